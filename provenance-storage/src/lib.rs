//! Storage abstraction for the provenance registry.
//!
//! Provides a [`KvStore`](traits::KvStore) trait with memory and SQLite
//! backends. The registry persists its admin and ownership map through this
//! layer; which backend is in use is a deployment decision, not a code one.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;
