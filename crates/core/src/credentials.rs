//! # Credentials Module
//!
//! Salted password hashing and verification. Passwords are never stored
//! or compared in clear text: each account keeps a random salt and a
//! SHA-256 digest of salt || password, both hex-encoded for the TEXT
//! columns in SQLite.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salted password digest, hex-encoded for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Hex-encoded random salt
    pub salt: String,
    /// Hex-encoded SHA-256 digest of salt || password
    pub digest: String,
}

impl Credential {
    /// Hash a password under a fresh random salt.
    pub fn hash(password: &str) -> Self {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = digest_with_salt(&salt, password);
        Self {
            salt: hex::encode(salt),
            digest: hex::encode(digest),
        }
    }

    /// Rebuild a credential from its stored columns.
    pub fn from_parts(salt: &str, digest: &str) -> Self {
        Self {
            salt: salt.to_string(),
            digest: digest.to_string(),
        }
    }
}

fn digest_with_salt(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Verifies a claimed password against a stored credential.
///
/// The seam exists so storage and operations never see raw password
/// comparison logic.
pub trait CredentialVerifier {
    fn verify(&self, credential: &Credential, password: &str) -> bool;
}

/// Default verifier: salted SHA-256 with constant-time digest comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaltedSha256;

impl CredentialVerifier for SaltedSha256 {
    fn verify(&self, credential: &Credential, password: &str) -> bool {
        let salt = match hex::decode(&credential.salt) {
            Ok(salt) => salt,
            Err(_) => return false,
        };
        let stored = match hex::decode(&credential.digest) {
            Ok(stored) => stored,
            Err(_) => return false,
        };
        let computed = digest_with_salt(&salt, password);
        constant_time_eq(&computed, &stored)
    }
}

/// Compare two digests without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
