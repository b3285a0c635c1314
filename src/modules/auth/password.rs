//! bcrypt hashing on the blocking pool.

use anyhow::Context;

/// Work factors bcrypt accepts.
pub const COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Salted bcrypt hashing at a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: String) -> anyhow::Result<String> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("password hashing task failed")?
            .context("failed to hash password")
    }

    /// Check `password` against a stored hash. A malformed hash is an error,
    /// not a mismatch.
    pub async fn verify(&self, password: String, hash: String) -> anyhow::Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("password verification task failed")?
            .context("failed to verify password hash")
    }
}
