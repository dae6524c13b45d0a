//! Parsing of stored credential formats.
//!
//! Argon2 credentials come in PHC string form:
//!
//! ```text
//! $argon2id$v=19$m=65536,t=4,p=1$<salt, base64 unpadded>$<hash, base64 unpadded>
//! ```

use std::fmt;

use argon2::{Algorithm, Version};
use zeroize::Zeroizing;

use crate::crypto::{KdfParams, MAX_OUTPUT_LEN, MIN_OUTPUT_LEN, MIN_SALT_LEN};
use crate::error::VerifyError;

pub mod b64;
pub mod bcrypt;

/// Number of `$`-separated segments, counting the empty one before the leading `$`.
pub const SEGMENTS: usize = 6;

const COST_KEYS: [&str; 3] = ["m", "t", "p"];

/// A parsed Argon2 credential.
///
/// `expected` holds exactly as many bytes as the recomputation must produce.
pub struct PhcHash {
    algorithm: Algorithm,
    version: Version,
    kdf: KdfParams,
    salt: Zeroizing<Vec<u8>>,
    expected: Zeroizing<Vec<u8>>,
}

impl PhcHash {
    /// Parses `stored`.
    ///
    /// # Errors
    ///
    /// - `MalformedEncoding` for a wrong segment count, bad integers or bad base64
    /// - `UnrecognizedScheme` for an algorithm other than argon2id / argon2i
    /// - `UnsupportedParameterRange` for unknown versions, zero costs, or salt/output
    ///   lengths the primitive cannot handle
    pub fn parse(stored: &str) -> Result<Self, VerifyError> {
        let parts: Vec<&str> = stored.split('$').collect();
        if parts.len() != SEGMENTS {
            return Err(VerifyError::MalformedEncoding(format!(
                "expected {SEGMENTS} segments, found {}",
                parts.len()
            )));
        }
        if !parts[0].is_empty() {
            return Err(VerifyError::MalformedEncoding(
                "missing leading '$'".into(),
            ));
        }

        let algorithm = parse_algorithm(parts[1])?;
        let version = parse_version(parts[2])?;
        let kdf = parse_costs(parts[3])?;

        let salt = b64::decode_unpadded(parts[4])?;
        if salt.len() < MIN_SALT_LEN {
            return Err(VerifyError::UnsupportedParameterRange(format!(
                "salt is {} bytes, need at least {MIN_SALT_LEN}",
                salt.len()
            )));
        }

        let expected = b64::decode_unpadded(parts[5])?;
        if !(MIN_OUTPUT_LEN..=MAX_OUTPUT_LEN).contains(&expected.len()) {
            return Err(VerifyError::UnsupportedParameterRange(format!(
                "hash is {} bytes, outside {MIN_OUTPUT_LEN}..={MAX_OUTPUT_LEN}",
                expected.len()
            )));
        }

        Ok(Self {
            algorithm,
            version,
            kdf,
            salt,
            expected,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn expected(&self) -> &[u8] {
        &self.expected
    }
}

// Salt and hash bytes stay out of debug output.
impl fmt::Debug for PhcHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhcHash")
            .field("algorithm", &self.algorithm)
            .field("version", &self.version)
            .field("kdf", &self.kdf)
            .field("salt_len", &self.salt.len())
            .field("expected_len", &self.expected.len())
            .finish()
    }
}

fn parse_algorithm(segment: &str) -> Result<Algorithm, VerifyError> {
    match segment {
        "argon2id" => Ok(Algorithm::Argon2id),
        "argon2i" => Ok(Algorithm::Argon2i),
        _ => Err(VerifyError::UnrecognizedScheme),
    }
}

fn parse_version(segment: &str) -> Result<Version, VerifyError> {
    let value = segment
        .strip_prefix("v=")
        .ok_or_else(|| VerifyError::MalformedEncoding("missing version segment".into()))?;
    let number = parse_uint(value, "version")?;
    Version::try_from(number)
        .map_err(|_| VerifyError::UnsupportedParameterRange(format!("argon2 version {number}")))
}

fn parse_costs(segment: &str) -> Result<KdfParams, VerifyError> {
    let pairs: Vec<&str> = segment.split(',').collect();
    if pairs.len() != COST_KEYS.len() {
        return Err(VerifyError::MalformedEncoding(format!(
            "expected {} cost parameters, found {}",
            COST_KEYS.len(),
            pairs.len()
        )));
    }

    let mut values = [0u32; 3];
    for ((pair, key), slot) in pairs.iter().zip(COST_KEYS).zip(values.iter_mut()) {
        let (k, v) = pair
            .split_once('=')
            .ok_or_else(|| VerifyError::MalformedEncoding(format!("'{key}' has no value")))?;
        if k != key {
            return Err(VerifyError::MalformedEncoding(format!(
                "expected '{key}', found '{k}'"
            )));
        }
        *slot = parse_uint(v, key)?;
    }

    let [mem, time, par] = values;
    KdfParams::new(mem, time, par)
}

fn parse_uint(value: &str, what: &str) -> Result<u32, VerifyError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VerifyError::MalformedEncoding(format!(
            "'{what}' is not a non-negative integer"
        )));
    }
    value
        .parse()
        .map_err(|_| VerifyError::MalformedEncoding(format!("'{what}' out of range")))
}
