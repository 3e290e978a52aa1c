use sha2::{Digest, Sha256};

/// Identifier generation strategy for records
///
/// Each call is self-contained; generators need no external synchronization.
pub trait IdGenerator: Send + Sync {
    /// Produce a string identifier, optionally derived from `seed`
    fn generate(&self, seed: &str) -> String;
}

/// Random UUID v4 identifiers (ignores the seed, not reproducible)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn generate(&self, _seed: &str) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Time-ordered ULID identifiers (ignores the seed, sortable by creation time)
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidGenerator;

impl UlidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UlidGenerator {
    fn generate(&self, _seed: &str) -> String {
        ulid::Ulid::new().to_string()
    }
}

/// Content-addressed identifiers: hex-encoded SHA-256 of the seed
///
/// Identical seeds always produce identical ids, so re-ingesting the same
/// document is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Generator;

impl Sha256Generator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for Sha256Generator {
    fn generate(&self, seed: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        hex::encode(hasher.finalize())
    }
}
