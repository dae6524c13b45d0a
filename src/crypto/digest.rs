use md5::Md5;
use sha2::{Digest, Sha256, Sha512};

use crate::error::VerifyError;

/// Lowercase hex digest of `input`, picked by the length of the stored hex string.
///
/// 32 -> MD5, 64 -> SHA-256, 128 -> SHA-512.
pub fn hex_digest_for_len(hex_len: usize, input: &[u8]) -> Result<String, VerifyError> {
    let hex = match hex_len {
        32 => hex::encode(Md5::digest(input)),
        64 => hex::encode(Sha256::digest(input)),
        128 => hex::encode(Sha512::digest(input)),
        other => {
            return Err(VerifyError::UnsupportedParameterRange(format!(
                "no digest produces {other} hex characters"
            )));
        }
    };
    Ok(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(
            hex_digest_for_len(32, b"Secret123!").unwrap(),
            "dbd4cd26d06af1db97df0d0aaa46ad59"
        );
        assert_eq!(
            hex_digest_for_len(64, b"Secret123!").unwrap(),
            "94e0f9bc7f5a5225bd141bad5adf9befcc112aef09b88f47a14e20b75a7bbec2"
        );
        assert_eq!(
            hex_digest_for_len(128, b"Secret123!").unwrap(),
            "e7c4f7a6da2f1c5c67dbc6fe9f229ebbfd9a6199aa65319d20e43df9b871fce2\
             294436f157f244dc74b7e250c6c0e5f6ecab5d53c67fbcc60d02dfd78f072047"
        );
    }

    #[test]
    fn unknown_length_fails() {
        assert!(hex_digest_for_len(40, b"x").is_err());
    }
}
