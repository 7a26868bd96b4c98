use thiserror::Error;

use provenance_storage::error::StorageError;
use provenance_types::error::RegistryError;

/// Errors surfaced by the store-backed registry engine.
///
/// Registry variants are caller precondition violations and carry the
/// contract's stable wire codes; storage variants are host faults.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EngineError {
    /// The stable wire code, when the failure is a registry rejection.
    pub fn wire_code(&self) -> Option<u32> {
        match self {
            EngineError::Registry(e) => Some(e.wire_code()),
            EngineError::Storage(_) => None,
        }
    }
}
