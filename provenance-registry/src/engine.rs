use std::sync::Arc;

use provenance_storage::traits::KvStore;
use provenance_types::genesis::GenesisConfig;
use provenance_types::primitives::{ContentId, Principal};

use crate::error::EngineError;
use crate::state::RegistryState;
use crate::store::RegistryStore;

/// Store-backed registry.
///
/// Holds the full state in memory and mirrors every committed transition
/// into the backing [`KvStore`]. Each operation validates against the
/// snapshot, persists, and only then updates memory, so a storage failure
/// leaves the visible state exactly as it was. Calls are serialized by the
/// `&mut self` receiver; the host decides how to share the engine.
pub struct Registry {
    state: RegistryState,
    store: RegistryStore,
}

impl Registry {
    /// Open the registry over the given store, seeding from genesis on
    /// first run. A store that already holds state keeps it — including an
    /// admin rotated away from the genesis one.
    pub fn open(store: Arc<dyn KvStore>, genesis: &GenesisConfig) -> Result<Self, EngineError> {
        let store = RegistryStore::new(store);
        store.check_schema_version()?;

        let state = match store.load_admin()? {
            Some(admin) => {
                let owners = store.load_all_owners()?;
                tracing::info!(admin = %admin, entries = owners.len(), "loaded registry state");
                RegistryState::from_parts(admin, owners)
            }
            None => {
                store.write_schema_version()?;
                store.save_admin(&genesis.admin)?;
                tracing::info!(admin = %genesis.admin, "seeded registry from genesis");
                RegistryState::new(genesis.admin.clone())
            }
        };

        Ok(Self { state, store })
    }

    /// The current admin.
    pub fn admin(&self) -> &Principal {
        self.state.admin()
    }

    /// Current owner of a content id, if registered.
    pub fn owner_of(&self, id: &ContentId) -> Option<&Principal> {
        self.state.owner_of(id)
    }

    /// Number of registered content ids.
    pub fn entry_count(&self) -> usize {
        self.state.entry_count()
    }

    /// Register `id` to the caller (admin only).
    pub fn register(&mut self, caller: &Principal, id: ContentId) -> Result<(), EngineError> {
        self.state.check_register(caller)?;
        self.store.save_owner(&id, caller)?;
        tracing::info!(content_id = %id, owner = %caller, "content registered");
        self.state.apply_register(id, caller.clone());
        Ok(())
    }

    /// Transfer `id` from the caller to `new_owner` (current owner only).
    pub fn transfer(
        &mut self,
        caller: &Principal,
        id: ContentId,
        new_owner: Principal,
    ) -> Result<(), EngineError> {
        self.state.check_transfer(caller, &id)?;
        self.store.save_owner(&id, &new_owner)?;
        tracing::info!(content_id = %id, from = %caller, to = %new_owner, "content transferred");
        self.state.apply_transfer(id, new_owner);
        Ok(())
    }

    /// Verify that `claimed_creator` is the registered owner of `id`.
    /// Pure read, never touches the store.
    pub fn verify(
        &self,
        id: &ContentId,
        claimed_creator: &Principal,
    ) -> Result<bool, EngineError> {
        Ok(self.state.verify(id, claimed_creator)?)
    }

    /// Rotate the admin role to `new_admin` (current admin only).
    pub fn set_admin(
        &mut self,
        caller: &Principal,
        new_admin: Principal,
    ) -> Result<(), EngineError> {
        self.state.check_set_admin(caller)?;
        self.store.save_admin(&new_admin)?;
        tracing::info!(old_admin = %self.state.admin(), new_admin = %new_admin, "admin rotated");
        self.state.apply_set_admin(new_admin);
        Ok(())
    }
}
