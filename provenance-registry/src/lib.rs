//! Content ownership registry.
//!
//! A single map from content identifier to owner principal, guarded by an
//! admin-only registration rule and an owner-only transfer rule, plus
//! single-admin rotation. [`state::RegistryState`] is the pure in-memory
//! state machine; [`engine::Registry`] pairs it with a
//! [`KvStore`](provenance_storage::traits::KvStore) so every committed
//! transition survives a restart.

pub mod engine;
pub mod error;
pub mod state;
pub mod store;
