//! Password hashing for the credential store
//!
//! # Algorithm
//!
//! 1. Prepend the per-user salt (hex string) to the raw password
//! 2. Calculate SHA-256 of the concatenated string
//! 3. Store as 64 hex characters alongside the salt
//!
//! Accounts written by older deployments carry an empty salt, in which case
//! the digest is over the bare password. Verification always recomputes.
//!
//! SHA-256 is a fast digest, not a key-derivation function. Per-user salts
//! defeat precomputed tables but not offline brute force of a leaked table.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Salt length in bytes (hex-encoded to twice this)
const SALT_BYTES: usize = 16;

/// Generate a random hex salt for a new account
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash `password` with `salt` (empty salt = legacy unsalted digest)
///
/// # Examples
///
/// ```
/// use talent_common::auth::hash_password;
///
/// let hash = hash_password("password123", "");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(
///     hash,
///     "ef92b778bafe771e89245b89ecbc08a44a4e166c06659911881f383d4473e94f"
/// );
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a password against a stored hash by recomputation
pub fn verify_password(password: &str, salt: &str, password_hash: &str) -> bool {
    let calculated = hash_password(password, salt);
    // Compare full length without early exit
    calculated.len() == password_hash.len()
        && calculated
            .bytes()
            .zip(password_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
