use std::collections::HashMap;

use provenance_types::error::RegistryError;
use provenance_types::primitives::{ContentId, Principal};

/// The registry's full in-memory state: one admin and one ownership map.
///
/// Every operation is a pure function of the current snapshot, the caller,
/// and the arguments. Each mutation is split into a `check_*` predicate and
/// an `apply_*` write so a persistence layer can validate, commit durably,
/// and only then touch the snapshot; the combined `register` / `transfer` /
/// `set_admin` methods perform check-then-apply in one call for embedded use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    admin: Principal,
    owners: HashMap<ContentId, Principal>,
}

impl RegistryState {
    /// Fresh state with the given admin and an empty ownership map.
    pub fn new(admin: Principal) -> Self {
        Self {
            admin,
            owners: HashMap::new(),
        }
    }

    /// Rebuild a state from persisted parts.
    pub fn from_parts(admin: Principal, owners: HashMap<ContentId, Principal>) -> Self {
        Self { admin, owners }
    }

    /// The current admin.
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Current owner of a content id, if it was ever registered.
    pub fn owner_of(&self, id: &ContentId) -> Option<&Principal> {
        self.owners.get(id)
    }

    /// Number of registered content ids.
    pub fn entry_count(&self) -> usize {
        self.owners.len()
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Check that `caller` may register content: admin only.
    pub fn check_register(&self, caller: &Principal) -> Result<(), RegistryError> {
        if caller != &self.admin {
            return Err(RegistryError::NotAdminForRegister);
        }
        Ok(())
    }

    /// Record `owner` for `id`, overwriting any prior entry. Re-registering
    /// an already-registered id reassigns it with no special case.
    pub fn apply_register(&mut self, id: ContentId, owner: Principal) {
        self.owners.insert(id, owner);
    }

    /// Register `id` to the caller. Fails with `NotAdminForRegister` when
    /// the caller is not the current admin; state is untouched on failure.
    pub fn register(&mut self, caller: &Principal, id: ContentId) -> Result<(), RegistryError> {
        self.check_register(caller)?;
        self.apply_register(id, caller.clone());
        Ok(())
    }

    // ── Transfer ────────────────────────────────────────────────────────

    /// Check that `caller` may transfer `id`.
    ///
    /// Checked in order: the id exists (`ContentNotFound`), then the caller
    /// is its current owner (`NotOwner`). A non-existent id always yields
    /// `ContentNotFound` regardless of caller.
    pub fn check_transfer(&self, caller: &Principal, id: &ContentId) -> Result<(), RegistryError> {
        let current_owner = self
            .owners
            .get(id)
            .ok_or_else(|| RegistryError::ContentNotFound(id.clone()))?;
        if caller != current_owner {
            return Err(RegistryError::NotOwner(id.clone()));
        }
        Ok(())
    }

    /// Overwrite the owner of `id` with `new_owner`.
    pub fn apply_transfer(&mut self, id: ContentId, new_owner: Principal) {
        self.owners.insert(id, new_owner);
    }

    /// Transfer `id` from the caller to `new_owner`. Self-transfer is a
    /// no-op success; there is no restriction on the new owner.
    pub fn transfer(
        &mut self,
        caller: &Principal,
        id: ContentId,
        new_owner: Principal,
    ) -> Result<(), RegistryError> {
        self.check_transfer(caller, &id)?;
        self.apply_transfer(id, new_owner);
        Ok(())
    }

    // ── Verification ────────────────────────────────────────────────────

    /// Verify that `claimed_creator` is the registered owner of `id`.
    ///
    /// Pure read. Returns `Ok(true)` on a match; an absent id and a
    /// mismatched creator both collapse to `VerificationFailed` — there is
    /// no `Ok(false)` branch.
    pub fn verify(
        &self,
        id: &ContentId,
        claimed_creator: &Principal,
    ) -> Result<bool, RegistryError> {
        match self.owners.get(id) {
            Some(owner) if owner == claimed_creator => Ok(true),
            _ => Err(RegistryError::VerificationFailed(id.clone())),
        }
    }

    // ── Admin rotation ──────────────────────────────────────────────────

    /// Check that `caller` may rotate the admin: current admin only.
    pub fn check_set_admin(&self, caller: &Principal) -> Result<(), RegistryError> {
        if caller != &self.admin {
            return Err(RegistryError::NotAdminForSetAdmin);
        }
        Ok(())
    }

    /// Replace the admin. The new admin may equal the current one.
    pub fn apply_set_admin(&mut self, new_admin: Principal) {
        self.admin = new_admin;
    }

    /// Rotate the admin role to `new_admin`. Fails with
    /// `NotAdminForSetAdmin` when the caller is not the current admin.
    pub fn set_admin(
        &mut self,
        caller: &Principal,
        new_admin: Principal,
    ) -> Result<(), RegistryError> {
        self.check_set_admin(caller)?;
        self.apply_set_admin(new_admin);
        Ok(())
    }
}
