//! Hash primitives used by the scheme verifiers.
//!
//! Argon2 recomputation, legacy digests, and constant-time comparison.

pub mod ct;
pub mod digest;
pub mod kdf;

pub use kdf::{KdfParams, derive_into};

/// Smallest salt the Argon2 primitive accepts (8 bytes).
pub const MIN_SALT_LEN: usize = 8;
/// Smallest Argon2 output length (4 bytes).
pub const MIN_OUTPUT_LEN: usize = 4;
/// Largest Argon2 memory cost we will recompute (4 GiB, in KiB).
pub const MAX_MEM_COST_KIB: u32 = 4 * 1024 * 1024;
/// Largest Argon2 output length we are willing to recompute (1 KiB).
pub const MAX_OUTPUT_LEN: usize = 1024;
