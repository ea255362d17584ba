//! Password hashing and verification using Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as Argon2Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashingError {
    #[error("Failed to hash or verify password: {0}")]
    Hash(Argon2Error),
}

impl From<Argon2Error> for HashingError {
    fn from(err: Argon2Error) -> Self {
        HashingError::Hash(err)
    }
}

pub trait Hasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, HashingError>;

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashingError>;
}

pub struct Argon2Hasher<'a> {
    argon2: Argon2<'a>,
}

impl Argon2Hasher<'_> {
    pub fn new() -> Self {
        Self { argon2: Argon2::default() }
    }
}

impl Default for Argon2Hasher<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Argon2Hasher<'_> {
    fn hash(&self, plain: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(plain.as_bytes(), &salt)?.to_string();
        Ok(hash)
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashingError> {
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(self.argon2.verify_password(plain.as_bytes(), &parsed_hash).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_succeeds_for_correct_password() {
        let hasher = Argon2Hasher::new();

        let hashed = hasher.hash("correct-horse-battery-staple").unwrap();

        assert!(hasher.verify("correct-horse-battery-staple", &hashed).unwrap());
    }

    #[test]
    fn verify_fails_for_incorrect_password() {
        let hasher = Argon2Hasher::new();

        let hashed = hasher.hash("correct-horse-battery-staple").unwrap();

        assert!(!hasher.verify("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2Hasher::new();

        let hash1 = hasher.hash("same-password").unwrap();
        let hash2 = hasher.hash("same-password").unwrap();

        assert_ne!(hash1, hash2);
    }
}
