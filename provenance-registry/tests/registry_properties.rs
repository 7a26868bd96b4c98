use std::sync::Arc;

use provenance_registry::engine::Registry;
use provenance_registry::error::EngineError;
use provenance_storage::memory::MemoryStore;
use provenance_storage::sqlite::SqliteStore;
use provenance_types::error::RegistryError;
use provenance_types::genesis::GenesisConfig;
use provenance_types::primitives::{ContentId, Principal};

const ADMIN: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";
const USER1: &str = "SP1HTBVD3JG9C05J7HBJTHGR0GGW7KXW28NRRZDYJ";
const USER2: &str = "SP3GWX3NE58KXHESRYE4DYQ1S31PQJTCRXB3PE9SB";
const USER3: &str = "SPJW1XE278YMCEYMXB8ZFGJMH8ZVAAEDP2S2PJYG";

fn make_registry() -> Registry {
    Registry::open(
        Arc::new(MemoryStore::new()),
        &GenesisConfig {
            admin: Principal::new(ADMIN),
        },
    )
    .unwrap()
}

fn wire_code(err: EngineError) -> u32 {
    err.wire_code().expect("expected a registry rejection")
}

#[test]
fn unregistered_content_fails_verify_and_transfer() {
    let mut registry = make_registry();
    let id = ContentId::new("never-registered");

    for principal in [ADMIN, USER1, USER2] {
        let err = registry.verify(&id, &Principal::new(principal)).unwrap_err();
        assert_eq!(wire_code(err), 104);
    }

    let err = registry
        .transfer(&Principal::new(USER1), id.clone(), Principal::new(USER2))
        .unwrap_err();
    assert_eq!(wire_code(err), 101);
    let err = registry
        .transfer(&Principal::new(ADMIN), id, Principal::new(USER1))
        .unwrap_err();
    assert_eq!(wire_code(err), 101);
}

#[test]
fn register_then_verify() {
    let mut registry = make_registry();
    let id = ContentId::new("content-123");

    registry.register(&Principal::new(ADMIN), id.clone()).unwrap();

    assert_eq!(registry.verify(&id, &Principal::new(ADMIN)).unwrap(), true);
    for other in [USER1, USER2, USER3] {
        let err = registry.verify(&id, &Principal::new(other)).unwrap_err();
        assert_eq!(wire_code(err), 104);
    }
}

#[test]
fn non_admin_register_never_mutates() {
    let mut registry = make_registry();
    let id = ContentId::new("content-123");

    let err = registry
        .register(&Principal::new(USER1), id.clone())
        .unwrap_err();
    assert_eq!(wire_code(err), 100);
    assert_eq!(registry.entry_count(), 0);
    assert_eq!(registry.owner_of(&id), None);
}

#[test]
fn registering_multiple_ids() {
    let mut registry = make_registry();
    let admin = Principal::new(ADMIN);

    registry.register(&admin, ContentId::new("content-123")).unwrap();
    registry.register(&admin, ContentId::new("content-456")).unwrap();

    assert_eq!(registry.entry_count(), 2);
    assert_eq!(registry.owner_of(&ContentId::new("content-123")), Some(&admin));
    assert_eq!(registry.owner_of(&ContentId::new("content-456")), Some(&admin));
}

#[test]
fn transfer_is_total_order_of_custody() {
    let mut registry = make_registry();
    let id = ContentId::new("content-123");
    let admin = Principal::new(ADMIN);
    let a = Principal::new(USER1);
    let b = Principal::new(USER2);

    registry.register(&admin, id.clone()).unwrap();
    registry.transfer(&admin, id.clone(), a.clone()).unwrap();
    registry.transfer(&a, id.clone(), b.clone()).unwrap();

    // Only the current custodian may transfer; everyone upstream fails.
    let err = registry
        .transfer(&admin, id.clone(), Principal::new(USER3))
        .unwrap_err();
    assert_eq!(wire_code(err), 102);
    let err = registry
        .transfer(&a, id.clone(), Principal::new(USER3))
        .unwrap_err();
    assert_eq!(wire_code(err), 102);

    registry.transfer(&b, id.clone(), Principal::new(USER3)).unwrap();
    assert_eq!(registry.owner_of(&id), Some(&Principal::new(USER3)));
}

#[test]
fn transfer_back_to_original_owner() {
    let mut registry = make_registry();
    let id = ContentId::new("content-123");
    let admin = Principal::new(ADMIN);
    let a = Principal::new(USER1);

    registry.register(&admin, id.clone()).unwrap();
    registry.transfer(&admin, id.clone(), a.clone()).unwrap();
    registry.transfer(&a, id.clone(), admin.clone()).unwrap();

    assert_eq!(registry.owner_of(&id), Some(&admin));
}

#[test]
fn verify_follows_transfer() {
    let mut registry = make_registry();
    let id = ContentId::new("content-123");
    let admin = Principal::new(ADMIN);
    let a = Principal::new(USER1);

    registry.register(&admin, id.clone()).unwrap();
    registry.transfer(&admin, id.clone(), a.clone()).unwrap();

    assert_eq!(registry.verify(&id, &a).unwrap(), true);
    let err = registry.verify(&id, &admin).unwrap_err();
    assert_eq!(wire_code(err), 104);
}

#[test]
fn admin_rotation_moves_register_rights() {
    let mut registry = make_registry();
    let admin = Principal::new(ADMIN);
    let new_admin = Principal::new(USER1);

    registry.register(&admin, ContentId::new("content-123")).unwrap();
    registry.set_admin(&admin, new_admin.clone()).unwrap();

    // New admin registers; old admin may not.
    registry
        .register(&new_admin, ContentId::new("content-456"))
        .unwrap();
    let err = registry
        .register(&admin, ContentId::new("content-789"))
        .unwrap_err();
    assert_eq!(wire_code(err), 100);

    // The old admin's content is unaffected and remains transferable by
    // its actual owner.
    registry
        .transfer(&admin, ContentId::new("content-123"), Principal::new(USER2))
        .unwrap();
    assert_eq!(
        registry.owner_of(&ContentId::new("content-123")),
        Some(&Principal::new(USER2))
    );
    assert_eq!(
        registry.owner_of(&ContentId::new("content-456")),
        Some(&new_admin)
    );

    // The new admin cannot transfer content it does not own.
    let err = registry
        .transfer(
            &new_admin,
            ContentId::new("content-123"),
            Principal::new(USER3),
        )
        .unwrap_err();
    assert_eq!(wire_code(err), 102);
}

#[test]
fn set_admin_by_non_admin_rejected_with_distinct_code() {
    let mut registry = make_registry();
    let err = registry
        .set_admin(&Principal::new(USER1), Principal::new(USER2))
        .unwrap_err();
    assert_eq!(wire_code(err), 105);
    assert_eq!(registry.admin(), &Principal::new(ADMIN));
}

#[test]
fn set_admin_to_self_is_noop_success() {
    let mut registry = make_registry();
    let admin = Principal::new(ADMIN);
    registry.set_admin(&admin, admin.clone()).unwrap();
    assert_eq!(registry.admin(), &admin);
}

#[test]
fn admin_changes_can_chain() {
    let mut registry = make_registry();
    registry
        .set_admin(&Principal::new(ADMIN), Principal::new(USER1))
        .unwrap();
    assert_eq!(registry.admin(), &Principal::new(USER1));

    registry
        .set_admin(&Principal::new(USER1), Principal::new(USER2))
        .unwrap();
    assert_eq!(registry.admin(), &Principal::new(USER2));
}

#[test]
fn custody_chain_scenario() {
    // register "content-123" by ADMIN, then
    // ADMIN -> USER1 -> USER2 -> USER3 -> USER1.
    let mut registry = make_registry();
    let id = ContentId::new("content-123");

    registry.register(&Principal::new(ADMIN), id.clone()).unwrap();
    registry
        .transfer(&Principal::new(ADMIN), id.clone(), Principal::new(USER1))
        .unwrap();
    registry
        .transfer(&Principal::new(USER1), id.clone(), Principal::new(USER2))
        .unwrap();
    registry
        .transfer(&Principal::new(USER2), id.clone(), Principal::new(USER3))
        .unwrap();
    registry
        .transfer(&Principal::new(USER3), id.clone(), Principal::new(USER1))
        .unwrap();

    assert_eq!(registry.owner_of(&id), Some(&Principal::new(USER1)));
    assert_eq!(registry.verify(&id, &Principal::new(USER1)).unwrap(), true);
    for loser in [ADMIN, USER2, USER3] {
        let err = registry.verify(&id, &Principal::new(loser)).unwrap_err();
        assert_eq!(wire_code(err), 104);
    }
}

#[test]
fn reregistration_overwrites_regardless_of_prior_owner() {
    let mut registry = make_registry();
    let id = ContentId::new("content-123");
    let admin = Principal::new(ADMIN);

    registry.register(&admin, id.clone()).unwrap();
    registry.transfer(&admin, id.clone(), Principal::new(USER1)).unwrap();
    assert_eq!(registry.owner_of(&id), Some(&Principal::new(USER1)));

    // Re-registering is not blocked by the existing entry.
    registry.register(&admin, id.clone()).unwrap();
    assert_eq!(registry.owner_of(&id), Some(&admin));
    assert_eq!(registry.entry_count(), 1);
}

#[test]
fn rotated_admin_can_reclaim_reregistered_id() {
    // Matches the deployed contract's behavior: after rotation the new
    // admin re-registers an existing id and takes ownership of it.
    let mut registry = make_registry();
    let id = ContentId::new("content-123");
    let admin = Principal::new(ADMIN);
    let new_admin = Principal::new(USER1);

    registry.register(&admin, id.clone()).unwrap();
    registry.set_admin(&admin, new_admin.clone()).unwrap();
    registry.register(&new_admin, id.clone()).unwrap();

    assert_eq!(registry.owner_of(&id), Some(&new_admin));
}

#[test]
fn full_history_survives_sqlite_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("provenance.db");
    let genesis = GenesisConfig {
        admin: Principal::new(ADMIN),
    };
    let id = ContentId::new("content-123");

    {
        let store = SqliteStore::new(db_path.to_str().unwrap()).unwrap();
        let mut registry = Registry::open(Arc::new(store), &genesis).unwrap();
        registry.register(&Principal::new(ADMIN), id.clone()).unwrap();
        registry
            .transfer(&Principal::new(ADMIN), id.clone(), Principal::new(USER1))
            .unwrap();
        registry
            .set_admin(&Principal::new(ADMIN), Principal::new(USER2))
            .unwrap();
    }

    let store = SqliteStore::new(db_path.to_str().unwrap()).unwrap();
    let registry = Registry::open(Arc::new(store), &genesis).unwrap();
    assert_eq!(registry.admin(), &Principal::new(USER2));
    assert_eq!(registry.owner_of(&id), Some(&Principal::new(USER1)));
    assert_eq!(registry.verify(&id, &Principal::new(USER1)).unwrap(), true);
    let err = registry.verify(&id, &Principal::new(ADMIN)).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Registry(RegistryError::VerificationFailed(_))
    ));
}
