use std::collections::HashMap;
use std::sync::Arc;

use borsh::BorshDeserialize;

use provenance_storage::error::StorageError;
use provenance_storage::traits::KvStore;
use provenance_types::primitives::{ContentId, Principal};

// Key layout for registry state.
const ADMIN_KEY: &[u8] = b"registry:admin";
const OWNER_PREFIX: &[u8] = b"registry:owner:";
const SCHEMA_VERSION_KEY: &[u8] = b"meta:schema_version";

/// Current schema version. Bump this whenever a breaking change is made to
/// any borsh-serialized value persisted through RegistryStore.
pub const SCHEMA_VERSION: u32 = 1;

/// Persistent store for registry state backed by a KvStore.
///
/// One key per content id plus one admin key; values are borsh-encoded
/// principals. Entries are only ever inserted or overwritten, never removed.
pub struct RegistryStore {
    store: Arc<dyn KvStore>,
}

impl RegistryStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    // ── Schema Version ──────────────────────────────────────────────────

    /// Check the persisted schema version against the current binary's version.
    ///
    /// A fresh store (no admin, no version) passes; seeding writes the tag.
    /// A store with registry data but no version key is treated as legacy
    /// and upgraded in place.
    pub fn check_schema_version(&self) -> Result<(), StorageError> {
        let stored = match self.store.get(SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                u32::try_from_slice(&bytes).map_err(|e| StorageError::DeserializationError {
                    reason: format!("failed to read schema version: {}", e),
                })?
            }
            None => {
                if !self.store.exists(ADMIN_KEY)? {
                    // Fresh store, nothing persisted yet.
                    return Ok(());
                }
                0 // legacy store without version tag
            }
        };

        if stored == SCHEMA_VERSION {
            return Ok(());
        }

        if stored == 0 {
            tracing::warn!(
                "registry store has no schema version (legacy data) — \
                 this binary expects schema v{}; run with --reset-state if you see deserialization errors",
                SCHEMA_VERSION
            );
            self.write_schema_version()?;
            return Ok(());
        }

        Err(StorageError::DeserializationError {
            reason: format!(
                "registry store schema version mismatch: store is v{}, binary expects v{} — \
                 run with --reset-state to wipe and restart",
                stored, SCHEMA_VERSION
            ),
        })
    }

    /// Write the current schema version to the store.
    pub fn write_schema_version(&self) -> Result<(), StorageError> {
        let value =
            borsh::to_vec(&SCHEMA_VERSION).map_err(|e| StorageError::SerializationError {
                reason: e.to_string(),
            })?;
        self.store.put(SCHEMA_VERSION_KEY, &value)
    }

    // ── Admin ───────────────────────────────────────────────────────────

    pub fn save_admin(&self, admin: &Principal) -> Result<(), StorageError> {
        let value = borsh::to_vec(admin).map_err(|e| StorageError::SerializationError {
            reason: e.to_string(),
        })?;
        self.store.put(ADMIN_KEY, &value)
    }

    /// Load the persisted admin, or `None` on a never-seeded store.
    pub fn load_admin(&self) -> Result<Option<Principal>, StorageError> {
        match self.store.get(ADMIN_KEY)? {
            Some(bytes) => {
                let admin = Principal::try_from_slice(&bytes).map_err(|e| {
                    StorageError::DeserializationError {
                        reason: format!("failed to read admin: {}", e),
                    }
                })?;
                Ok(Some(admin))
            }
            None => Ok(None),
        }
    }

    // ── Owners ──────────────────────────────────────────────────────────

    pub fn save_owner(&self, id: &ContentId, owner: &Principal) -> Result<(), StorageError> {
        let key = self.owner_key(id);
        let value = borsh::to_vec(owner).map_err(|e| StorageError::SerializationError {
            reason: e.to_string(),
        })?;
        self.store.put(&key, &value)
    }

    /// Load the full ownership map via a prefix scan.
    pub fn load_all_owners(&self) -> Result<HashMap<ContentId, Principal>, StorageError> {
        let pairs = self.store.prefix_scan(OWNER_PREFIX)?;
        let mut owners = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            let id = self.content_id_from_key(&key)?;
            let owner = Principal::try_from_slice(&value).map_err(|e| {
                StorageError::DeserializationError {
                    reason: format!("failed to read owner of '{}': {}", id, e),
                }
            })?;
            owners.insert(id, owner);
        }
        Ok(owners)
    }

    fn owner_key(&self, id: &ContentId) -> Vec<u8> {
        let mut key = Vec::with_capacity(OWNER_PREFIX.len() + id.as_bytes().len());
        key.extend_from_slice(OWNER_PREFIX);
        key.extend_from_slice(id.as_bytes());
        key
    }

    fn content_id_from_key(&self, key: &[u8]) -> Result<ContentId, StorageError> {
        let suffix = &key[OWNER_PREFIX.len()..];
        let id = std::str::from_utf8(suffix).map_err(|e| StorageError::DeserializationError {
            reason: format!("owner key is not valid UTF-8: {}", e),
        })?;
        Ok(ContentId::new(id))
    }
}
