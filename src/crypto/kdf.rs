use argon2::{Algorithm, Argon2, Block, Params, Version};
use serde::Serialize;
use zeroize::Zeroizing;

use super::{MAX_MEM_COST_KIB, MAX_OUTPUT_LEN, MIN_OUTPUT_LEN, MIN_SALT_LEN};
use crate::error::VerifyError;

/// Argon2 cost parameters as carried in a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KdfParams {
    mem_cost_kib: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // the backend's Argon2id defaults
        Self {
            mem_cost_kib: 64 * 1024, // 64 MiB
            time_cost: 4,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    pub fn new(mem_cost_kib: u32, time_cost: u32, parallelism: u32) -> Result<Self, VerifyError> {
        let params = Self {
            mem_cost_kib,
            time_cost,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn validate(&self) -> Result<(), VerifyError> {
        let out_of_range = |msg: &str| Err(VerifyError::UnsupportedParameterRange(msg.into()));

        if self.time_cost < 1 {
            return out_of_range("argon2 time cost must be >= 1");
        }
        if self.parallelism < 1 {
            return out_of_range("argon2 parallelism must be >= 1");
        }
        if u64::from(self.mem_cost_kib) < 8 * u64::from(self.parallelism) {
            return out_of_range("argon2 memory cost must be at least 8 * parallelism");
        }
        if self.mem_cost_kib > MAX_MEM_COST_KIB {
            return out_of_range("argon2 memory cost above the 4 GiB ceiling");
        }
        Ok(())
    }
}

/// Recomputes an Argon2 hash of `password` into `out`.
///
/// The length of `out` is the requested output length.
pub fn derive_into(
    password: &[u8],
    salt: &[u8],
    kdf: KdfParams,
    algorithm: Algorithm,
    version: Version,
    out: &mut [u8],
) -> Result<(), VerifyError> {
    kdf.validate()?;

    if salt.len() < MIN_SALT_LEN {
        return Err(VerifyError::UnsupportedParameterRange(format!(
            "salt is {} bytes, need at least {MIN_SALT_LEN}",
            salt.len()
        )));
    }
    if !(MIN_OUTPUT_LEN..=MAX_OUTPUT_LEN).contains(&out.len()) {
        return Err(VerifyError::UnsupportedParameterRange(format!(
            "output length {} outside {MIN_OUTPUT_LEN}..={MAX_OUTPUT_LEN}",
            out.len()
        )));
    }

    let params = Params::new(
        kdf.mem_cost_kib,
        kdf.time_cost,
        kdf.parallelism,
        Some(out.len()),
    )
    .map_err(|e| VerifyError::UnsupportedParameterRange(format!("argon2 params: {e}")))?;

    let mut blocks = allocate_blocks(params.block_count())?;

    Argon2::new(algorithm, version, params)
        .hash_password_into_with_memory(password, salt, out, blocks.as_mut_slice())
        .map_err(|e| VerifyError::Primitive(format!("argon2 hashing failed: {e}")))
}

/// Reserves the Argon2 working memory without aborting when the allocator refuses.
fn allocate_blocks(count: usize) -> Result<Zeroizing<Vec<Block>>, VerifyError> {
    let mut blocks = Vec::new();
    blocks.try_reserve_exact(count).map_err(|e| {
        VerifyError::Primitive(format!("cannot allocate {count} argon2 blocks: {e}"))
    })?;
    blocks.resize(count, Block::default());
    Ok(Zeroizing::new(blocks))
}
