use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::primitives::Principal;

/// Configuration applied once, when the registry is first deployed.
///
/// The admin seeded here is only consulted on an empty store; a restarted
/// registry keeps whatever admin the persisted state carries, including
/// one rotated via `set_admin`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The initial admin principal.
    pub admin: Principal,
}
