//! Structural check of bcrypt modular-crypt strings: `$2y$10$` + 22 salt + 31 hash chars.
//!
//! Checks run in the order the bcrypt primitive applies them, so a credential that
//! passes here only fails verification on a wrong password.

use base64::Engine;
use base64::alphabet::BCRYPT;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};

use crate::error::VerifyError;

const ENCODED_LEN: usize = 53;
const SALT_LEN: usize = 22;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(&BCRYPT, NO_PAD);

/// Returns the cost factor if `stored` is a bcrypt hash the primitive can check.
pub fn check_shape(stored: &str) -> Result<u32, VerifyError> {
    let parts: Vec<&str> = stored.split('$').filter(|s| !s.is_empty()).collect();
    let [version, cost, encoded] = parts[..] else {
        return Err(VerifyError::MalformedEncoding(
            "bcrypt: expected version, cost and hash segments".into(),
        ));
    };

    if !matches!(version, "2a" | "2b" | "2x" | "2y") {
        return Err(VerifyError::MalformedEncoding(format!(
            "bcrypt: unknown version '{version}'"
        )));
    }

    let cost: u32 = cost
        .parse()
        .map_err(|_| VerifyError::MalformedEncoding(format!("bcrypt: bad cost '{cost}'")))?;

    if encoded.len() != ENCODED_LEN || !encoded.is_char_boundary(SALT_LEN) {
        return Err(VerifyError::MalformedEncoding(format!(
            "bcrypt: salt and hash must be {ENCODED_LEN} characters"
        )));
    }
    let (salt, hash) = encoded.split_at(SALT_LEN);

    BCRYPT_B64
        .decode(salt)
        .map_err(|e| VerifyError::MalformedEncoding(format!("bcrypt salt: {e}")))?;

    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(VerifyError::UnsupportedParameterRange(format!("bcrypt cost {cost}")));
    }

    BCRYPT_B64
        .decode(hash)
        .map_err(|e| VerifyError::MalformedEncoding(format!("bcrypt hash: {e}")))?;

    Ok(cost)
}
