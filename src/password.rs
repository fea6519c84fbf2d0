//! Password hashing and verification.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::Error;

/// A bcrypt hash of a user's password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `raw_password` with bcrypt at `cost`.
    ///
    /// Use [bcrypt::DEFAULT_COST] unless a test needs faster hashing.
    ///
    /// # Errors
    /// Returns an [Error::HashingError] if hashing failed.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let hashed_password =
            hash(raw_password, cost).map_err(|error| Error::HashingError(error.to_string()))?;

        Ok(Self(hashed_password))
    }

    /// Wrap a string that is already a hash.
    ///
    /// Intended for rehydrating hashes from the database. No validation is
    /// performed.
    pub fn new_unchecked(hash: &str) -> Self {
        Self(hash.to_string())
    }

    /// Check whether `raw_password` matches this hash.
    ///
    /// # Errors
    /// Returns an [Error::HashingError] if the stored hash could not be
    /// parsed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The default bcrypt cost for new passwords.
pub const HASH_COST: u32 = DEFAULT_COST;
