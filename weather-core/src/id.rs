use std::fmt::Debug;
use uuid::Uuid;

/// Source of opaque record identifiers.
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> Uuid;
}

/// Mints a random v4 UUID per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
