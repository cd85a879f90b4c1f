use crate::constants::DIGEST_LEN;
use sha2::{Digest as _, Sha256};
use std::fmt;

// Hashing helpers. Every projection of a scanned code starts from this digest so the same
// payload always lands on the same face.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

pub fn derive_digest(payload: &str) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    Digest(hasher.finalize().into())
}

/// Polynomial rolling hash `h = h * 31 + byte`, wrapping at 32 bits.
pub fn rolling_hash(bytes: &[u8]) -> i32 {
    bytes
        .iter()
        .fold(0i32, |h, &b| h.wrapping_mul(31).wrapping_add(b as i32))
}
