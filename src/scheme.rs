//! Classification of stored credentials by their structural markers.

use serde::Serialize;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];
const ARGON2ID_PREFIX: &str = "$argon2id$";
const ARGON2I_PREFIX: &str = "$argon2i$";

/// The scheme a stored credential was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    Bcrypt,
    Argon2id,
    Argon2i,
    Md5Hex,
    Sha256Hex,
    Sha512Hex,
    /// No confidentiality at all. Only tolerated for development data.
    PlainText,
    Unrecognized,
}

impl Scheme {
    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Bcrypt => "BCrypt",
            Scheme::Argon2id => "Argon2id",
            Scheme::Argon2i => "Argon2i",
            Scheme::Md5Hex => "MD5",
            Scheme::Sha256Hex => "SHA-256",
            Scheme::Sha512Hex => "SHA-512",
            Scheme::PlainText => "Plain Text (Development Only)",
            Scheme::Unrecognized => "Unknown",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies `stored`. Total: every string maps to exactly one scheme.
///
/// The hex digest schemes are a length heuristic. Any 32, 64 or 128 character
/// hex string is taken to be a digest, whatever actually produced it.
pub fn detect(stored: &str) -> Scheme {
    if stored.is_empty() {
        return Scheme::Unrecognized;
    }

    if BCRYPT_PREFIXES.iter().any(|p| stored.starts_with(p)) {
        return Scheme::Bcrypt;
    }

    if stored.starts_with(ARGON2ID_PREFIX) {
        return Scheme::Argon2id;
    }
    if stored.starts_with(ARGON2I_PREFIX) {
        return Scheme::Argon2i;
    }

    if stored.bytes().all(|b| b.is_ascii_hexdigit()) {
        match stored.len() {
            32 => return Scheme::Md5Hex,
            64 => return Scheme::Sha256Hex,
            128 => return Scheme::Sha512Hex,
            _ => {}
        }
    }

    Scheme::PlainText
}
