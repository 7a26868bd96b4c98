use thiserror::Error;

use crate::primitives::ContentId;

/// All registry error codes. The set is closed: every failure is a
/// caller-supplied precondition violation returned as a value, never a
/// panic. Wire codes match the deployed contract (see [`RegistryError::wire_code`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the current admin; raised by `register`.
    #[error("caller is not the registry admin")]
    NotAdminForRegister,

    /// Content id has never been registered.
    #[error("content not found: {0}")]
    ContentNotFound(ContentId),

    /// Caller is not the current owner of the content.
    #[error("caller is not the current owner of {0}")]
    NotOwner(ContentId),

    /// Content is absent, or present with a different creator. The two
    /// cases are deliberately not distinguished.
    #[error("creator verification failed for {0}")]
    VerificationFailed(ContentId),

    /// Caller is not the current admin; raised by `set_admin`.
    #[error("caller is not the registry admin")]
    NotAdminForSetAdmin,
}

impl RegistryError {
    /// Stable numeric code for external/wire representations.
    ///
    /// The deployed contract uses two distinct codes for "not admin",
    /// one per operation; both are preserved here.
    pub fn wire_code(&self) -> u32 {
        match self {
            RegistryError::NotAdminForRegister => 100,
            RegistryError::ContentNotFound(_) => 101,
            RegistryError::NotOwner(_) => 102,
            RegistryError::VerificationFailed(_) => 104,
            RegistryError::NotAdminForSetAdmin => 105,
        }
    }
}
