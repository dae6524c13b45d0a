//! One recomputation routine per scheme.
//!
//! Each returns `Ok(true)` on a match, `Ok(false)` on a mismatch and `Err` when the
//! stored credential cannot be checked at all. The public facade folds `Err` into `false`.

use bcrypt::BcryptError;
use zeroize::Zeroizing;

use crate::crypto::{self, ct, digest};
use crate::error::VerifyError;
use crate::format::PhcHash;
use crate::scheme::Scheme;

/// Dispatches to the verifier for `scheme`.
pub fn by_scheme(scheme: Scheme, candidate: &str, stored: &str) -> Result<bool, VerifyError> {
    match scheme {
        Scheme::Bcrypt => verify_bcrypt(candidate, stored),
        Scheme::Argon2id | Scheme::Argon2i => verify_argon2(candidate, stored),
        Scheme::Md5Hex | Scheme::Sha256Hex | Scheme::Sha512Hex => {
            verify_hex_digest(candidate, stored)
        }
        Scheme::PlainText => Ok(verify_plain_text(candidate, stored)),
        Scheme::Unrecognized => Err(VerifyError::UnrecognizedScheme),
    }
}

/// Delegates to the bcrypt primitive, which carries its own salt, cost and
/// constant-time check.
pub fn verify_bcrypt(candidate: &str, stored: &str) -> Result<bool, VerifyError> {
    bcrypt::verify(candidate, stored).map_err(|e| match e {
        BcryptError::CostNotAllowed(_) => {
            VerifyError::UnsupportedParameterRange(format!("bcrypt: {e}"))
        }
        BcryptError::InvalidCost(_)
        | BcryptError::InvalidHash(_)
        | BcryptError::InvalidPrefix(_)
        | BcryptError::InvalidBase64(_)
        | BcryptError::InvalidSaltLen(_) => VerifyError::MalformedEncoding(format!("bcrypt: {e}")),
        _ => VerifyError::Primitive(format!("bcrypt: {e}")),
    })
}

/// Recomputes an Argon2 hash with the parameters embedded in `stored`.
pub fn verify_argon2(candidate: &str, stored: &str) -> Result<bool, VerifyError> {
    let phc = PhcHash::parse(stored)?;

    tracing::trace!(
        algorithm = ?phc.algorithm(),
        m = phc.kdf().mem_cost_kib(),
        t = phc.kdf().time_cost(),
        p = phc.kdf().parallelism(),
        "recomputing argon2 hash"
    );

    let mut computed = Zeroizing::new(vec![0u8; phc.expected().len()]);
    crypto::derive_into(
        candidate.as_bytes(),
        phc.salt(),
        *phc.kdf(),
        phc.algorithm(),
        phc.version(),
        &mut computed,
    )?;

    Ok(ct::eq(&computed, phc.expected()))
}

/// Legacy unsalted digests stored as hex. The digest is chosen by length alone.
pub fn verify_hex_digest(candidate: &str, stored: &str) -> Result<bool, VerifyError> {
    let computed = Zeroizing::new(digest::hex_digest_for_len(
        stored.len(),
        candidate.as_bytes(),
    )?);
    let expected = Zeroizing::new(stored.to_ascii_lowercase());
    Ok(ct::eq(computed.as_bytes(), expected.as_bytes()))
}

/// Plain equality against an unhashed stored password.
///
/// Provides no confidentiality whatsoever. Only reached as the last-resort fallback
/// for development data.
pub fn verify_plain_text(candidate: &str, stored: &str) -> bool {
    tracing::warn!("stored credential is plain text; development data only");
    ct::eq(candidate.as_bytes(), stored.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::b64;
    use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version, password_hash::SaltString};

    fn phc_hash(algorithm: Algorithm, password: &str, salt: &[u8]) -> String {
        let params = Params::new(1024, 1, 1, None).unwrap();
        let salt = SaltString::encode_b64(salt).unwrap();
        Argon2::new(algorithm, Version::V0x13, params)
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn argon2id_roundtrip() {
        let stored = phc_hash(Algorithm::Argon2id, "correct horse", b"0123456789abcdef");
        assert!(stored.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert_eq!(verify_argon2("correct horse", &stored), Ok(true));
        assert_eq!(verify_argon2("correct horsf", &stored), Ok(false));
    }

    #[test]
    fn argon2i_roundtrip() {
        let stored = phc_hash(Algorithm::Argon2i, "pw", b"0123456789abcdef");
        assert_eq!(verify_argon2("pw", &stored), Ok(true));
        assert_eq!(verify_argon2("pW", &stored), Ok(false));
    }

    #[test]
    fn argon2_salt_lengths_with_every_padding() {
        // 16, 17 and 18 byte salts need 2, 1 and 0 padding characters
        for salt in [
            &b"0123456789abcdef"[..],
            &b"0123456789abcdefg"[..],
            &b"0123456789abcdefgh"[..],
        ] {
            let stored = phc_hash(Algorithm::Argon2id, "pw", salt);
            assert_eq!(verify_argon2("pw", &stored), Ok(true), "{stored}");
        }
    }

    #[test]
    fn argon2_honours_output_length() {
        let mut out = [0u8; 16];
        crypto::derive_into(
            b"pw",
            b"0123456789abcdef",
            crypto::KdfParams::new(1024, 1, 1).unwrap(),
            Algorithm::Argon2id,
            Version::V0x13,
            &mut out,
        )
        .unwrap();
        let stored = format!(
            "$argon2id$v=19$m=1024,t=1,p=1${}${}",
            b64::encode_unpadded(b"0123456789abcdef"),
            b64::encode_unpadded(&out)
        );
        assert_eq!(verify_argon2("pw", &stored), Ok(true));
    }

    #[test]
    fn argon2_wrong_variant_does_not_match() {
        let stored = phc_hash(Algorithm::Argon2id, "pw", b"0123456789abcdef");
        let swapped = stored.replacen("$argon2id$", "$argon2i$", 1);
        assert_eq!(verify_argon2("pw", &swapped), Ok(false));
    }

    #[test]
    fn argon2_malformed_is_error() {
        assert!(verify_argon2("pw", "$argon2id$v=19$m=65536,t=4,p=1$onlyfourparts").is_err());
    }

    #[test]
    fn bcrypt_roundtrip() {
        let stored = bcrypt::hash("hunter2", 4).unwrap();
        assert_eq!(verify_bcrypt("hunter2", &stored), Ok(true));
        assert_eq!(verify_bcrypt("hunter3", &stored), Ok(false));
    }

    #[test]
    fn bcrypt_php_prefix() {
        let stored = bcrypt::hash("hunter2", 4).unwrap();
        let php = format!("$2y${}", &stored[4..]);
        assert_eq!(verify_bcrypt("hunter2", &php), Ok(true));
    }

    #[test]
    fn bcrypt_truncated_hash_is_error() {
        assert!(verify_bcrypt("hunter2", "$2y$10$tooshort").is_err());
    }

    #[test]
    fn bcrypt_bad_salt_encoding_is_malformed() {
        // 22nd salt character with non-zero trailing bits
        let mut bad = bcrypt::hash("hunter2", 4).unwrap();
        bad.replace_range(28..29, "z");
        let err = verify_bcrypt("hunter2", &bad).unwrap_err();
        assert!(matches!(err, VerifyError::MalformedEncoding(_)), "{err}");
    }

    #[test]
    fn hex_digest_case_insensitive_stored() {
        let lower = "94e0f9bc7f5a5225bd141bad5adf9befcc112aef09b88f47a14e20b75a7bbec2";
        assert_eq!(verify_hex_digest("Secret123!", lower), Ok(true));
        assert_eq!(verify_hex_digest("Secret123!", &lower.to_ascii_uppercase()), Ok(true));
        assert_eq!(verify_hex_digest("secret123!", lower), Ok(false));
    }

    #[test]
    fn plain_text_is_exact() {
        assert!(verify_plain_text("plainpw", "plainpw"));
        assert!(!verify_plain_text("PlainPw", "plainpw"));
        assert!(!verify_plain_text("plainpw ", "plainpw"));
    }

    #[test]
    fn unrecognized_is_error() {
        assert_eq!(
            by_scheme(Scheme::Unrecognized, "pw", ""),
            Err(VerifyError::UnrecognizedScheme)
        );
    }
}
