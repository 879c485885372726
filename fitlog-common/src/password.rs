//! Password hashing and session tokens
//!
//! Passwords are stored as bcrypt strings in `users.password_hash`; the salt
//! and cost travel inside the hash itself.

use crate::Result;
use rand::RngCore;

/// bcrypt work factor for new hashes
pub const HASH_COST: u32 = 10;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// Check a candidate password against a stored bcrypt hash
///
/// A malformed or empty stored hash never matches.
pub fn verify_password(candidate: &str, hash: &str) -> bool {
    bcrypt::verify(candidate, hash).unwrap_or(false)
}

/// Random hex token with `bytes` bytes of entropy
pub fn random_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{:02x}", b)).collect()
}
