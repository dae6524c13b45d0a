use thiserror::Error;

/// Why a stored credential could not be checked.
///
/// These never reach callers of [`crate::verify`], which only ever sees `false`.
/// [`crate::inspect`] is the one place they are surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("unsupported parameter range: {0}")]
    UnsupportedParameterRange(String),
    #[error("unrecognized hash scheme")]
    UnrecognizedScheme,
    #[error("hash primitive failed: {0}")]
    Primitive(String),
}

impl VerifyError {
    /// Short category label, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::MalformedEncoding(_) => "malformed-encoding",
            VerifyError::UnsupportedParameterRange(_) => "unsupported-parameters",
            VerifyError::UnrecognizedScheme => "unrecognized-scheme",
            VerifyError::Primitive(_) => "primitive-failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            VerifyError::MalformedEncoding("x".into()).kind(),
            VerifyError::UnsupportedParameterRange("x".into()).kind(),
            VerifyError::UnrecognizedScheme.kind(),
            VerifyError::Primitive("x".into()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_includes_detail() {
        let err = VerifyError::MalformedEncoding("bad salt".into());
        assert_eq!(err.to_string(), "malformed encoding: bad salt");
    }
}
