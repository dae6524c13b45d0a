//! Fail-closed verification of stored password credentials.
//!
//! Stored credentials may come from bcrypt, Argon2id/Argon2i (PHC strings), legacy
//! unsalted MD5/SHA-256/SHA-512 hex digests, or plain text left over from development.
//! [`verify`] sniffs the scheme, recomputes under the embedded parameters, and compares
//! in constant time. Every failure is reported as `false`.

pub mod crypto;
mod error;
pub mod format;
pub mod policy;
mod scheme;
mod verify;

pub use crate::crypto::KdfParams;
pub use crate::error::VerifyError;
pub use crate::format::PhcHash;
pub use crate::scheme::{Scheme, detect};

use argon2::{Algorithm, Version};

/// Checks `candidate` against a stored credential.
///
/// `stored` is trimmed once before classification. A missing or blank credential,
/// a wrong password and an unusable credential all return `false`.
///
/// ```
/// let sha256 = "94e0f9bc7f5a5225bd141bad5adf9befcc112aef09b88f47a14e20b75a7bbec2";
/// assert!(credcheck::verify("Secret123!", sha256));
/// assert!(!credcheck::verify("secret123!", sha256));
/// assert!(!credcheck::verify("Secret123!", None));
/// ```
pub fn verify<'a>(candidate: &str, stored: impl Into<Option<&'a str>>) -> bool {
    let Some(stored) = stored.into().map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };

    let scheme = detect(stored);
    match verify::by_scheme(scheme, candidate, stored) {
        Ok(matched) => {
            tracing::debug!(scheme = scheme.name(), "credential checked");
            matched
        }
        Err(e) => {
            tracing::debug!(
                scheme = scheme.name(),
                error = e.kind(),
                "credential could not be checked"
            );
            false
        }
    }
}

/// Displayable scheme name for a stored credential, for diagnostics only.
pub fn classify<'a>(stored: impl Into<Option<&'a str>>) -> &'static str {
    match stored.into().map(str::trim) {
        None | Some("") => "Empty",
        Some(s) => detect(s).name(),
    }
}

/// Structural diagnosis of a stored credential. Never touches a password.
///
/// This is the only entry point that says *why* a credential would fail to verify.
pub fn inspect(stored: &str) -> Result<Scheme, VerifyError> {
    let stored = stored.trim();
    let scheme = detect(stored);
    match scheme {
        Scheme::Argon2id | Scheme::Argon2i => {
            PhcHash::parse(stored)?;
        }
        Scheme::Bcrypt => {
            format::bcrypt::check_shape(stored)?;
        }
        Scheme::Unrecognized => return Err(VerifyError::UnrecognizedScheme),
        Scheme::Md5Hex | Scheme::Sha256Hex | Scheme::Sha512Hex | Scheme::PlainText => {}
    }
    Ok(scheme)
}

/// Whether a stored credential should be replaced by a fresh Argon2id hash with `target` costs.
///
/// Only a well-formed Argon2id v19 credential with exactly `target`'s costs is current.
pub fn needs_rehash(stored: &str, target: &KdfParams) -> bool {
    let stored = stored.trim();
    if detect(stored) != Scheme::Argon2id {
        return true;
    }
    match PhcHash::parse(stored) {
        Ok(phc) => {
            phc.algorithm() != Algorithm::Argon2id
                || phc.version() != Version::V0x13
                || phc.kdf() != target
        }
        Err(_) => true,
    }
}
