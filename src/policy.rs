//! Password strength rules matching the backend's signup validation.
//!
//! Independent of verification: nothing in the verification path calls this.

use std::fmt;

pub const DEFAULT_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrengthIssue {
    Missing,
    TooShort { min: usize },
    NoLowercase,
    NoUppercase,
    NoDigit,
    NoSpecial,
}

impl fmt::Display for StrengthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthIssue::Missing => write!(f, "a password is required"),
            StrengthIssue::TooShort { min } => {
                write!(f, "password must be at least {min} characters long")
            }
            StrengthIssue::NoLowercase => write!(f, "password needs a lowercase letter"),
            StrengthIssue::NoUppercase => write!(f, "password needs an uppercase letter"),
            StrengthIssue::NoDigit => write!(f, "password needs a digit"),
            StrengthIssue::NoSpecial => write!(f, "password needs a special character"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StrengthReport {
    issues: Vec<StrengthIssue>,
}

impl StrengthReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[StrengthIssue] {
        &self.issues
    }
}

impl fmt::Display for StrengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "password is valid");
        }
        write!(f, "password is invalid:")?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

/// Checks `password` against every rule and reports all failures at once.
pub fn check_strength(password: &str, min_length: usize) -> StrengthReport {
    if password.is_empty() {
        return StrengthReport {
            issues: vec![StrengthIssue::Missing],
        };
    }

    let mut issues = Vec::new();

    if password.chars().count() < min_length {
        issues.push(StrengthIssue::TooShort { min: min_length });
    }
    if !password.chars().any(char::is_lowercase) {
        issues.push(StrengthIssue::NoLowercase);
    }
    if !password.chars().any(char::is_uppercase) {
        issues.push(StrengthIssue::NoUppercase);
    }
    if !password.chars().any(char::is_numeric) {
        issues.push(StrengthIssue::NoDigit);
    }
    if password.chars().all(char::is_alphanumeric) {
        issues.push(StrengthIssue::NoSpecial);
    }

    StrengthReport { issues }
}
