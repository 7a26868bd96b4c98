use std::sync::Arc;

use tokio::sync::RwLock;

use provenance_registry::engine::Registry;
use provenance_storage::memory::MemoryStore;
use provenance_storage::sqlite::SqliteStore;
use provenance_storage::traits::KvStore;
use provenance_types::genesis::GenesisConfig;
use provenance_types::primitives::Principal;

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::rpc::auth::RpcAuthConfig;

/// The main node that ties the storage backend, registry engine, and RPC
/// server together.
pub struct Node {
    config: NodeConfig,
    registry: Arc<RwLock<Registry>>,
    rpc_handle: Option<jsonrpsee::server::ServerHandle>,
}

/// Create a storage backend from the node configuration.
fn create_store(config: &NodeConfig) -> Result<Arc<dyn KvStore>, NodeError> {
    match config.storage.db_type.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "sqlite" => {
            let data_dir = std::path::Path::new(&config.storage.data_dir);
            std::fs::create_dir_all(data_dir)?;
            let db_path = data_dir.join("provenance.db");
            let store = SqliteStore::new(db_path.to_str().unwrap_or("provenance.db"))
                .map_err(NodeError::StorageError)?;
            Ok(Arc::new(store))
        }
        other => Err(NodeError::ConfigError {
            reason: format!(
                "unknown storage backend '{}', expected 'memory' or 'sqlite'",
                other
            ),
        }),
    }
}

impl Node {
    /// Create a new node from the given configuration.
    pub async fn new(config: NodeConfig) -> Result<Self, NodeError> {
        if config.genesis.admin.trim().is_empty() {
            return Err(NodeError::ConfigError {
                reason: "genesis.admin must not be empty".to_string(),
            });
        }

        let store = create_store(&config)?;
        let genesis = GenesisConfig {
            admin: Principal::new(config.genesis.admin.clone()),
        };
        let registry = Registry::open(store, &genesis)?;
        tracing::info!(
            admin = %registry.admin(),
            entries = registry.entry_count(),
            backend = %config.storage.db_type,
            "registry opened"
        );

        Ok(Self {
            config,
            registry: Arc::new(RwLock::new(registry)),
            rpc_handle: None,
        })
    }

    /// Run the node until interrupted.
    pub async fn run(&mut self) -> Result<(), NodeError> {
        if self.config.rpc.enabled {
            let auth = match &self.config.rpc.api_key {
                Some(key) => RpcAuthConfig::with_key(key.clone()),
                None => RpcAuthConfig::open(),
            };
            let handle = crate::rpc::server::start_rpc_server(
                &self.config.rpc.listen_addr,
                self.registry.clone(),
                auth,
            )
            .await?;
            self.rpc_handle = Some(handle);
        } else {
            tracing::warn!("RPC disabled; node will serve no requests");
        }

        tracing::info!("registry node started");

        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown signal received");

        if let Some(handle) = self.rpc_handle.take() {
            let _ = handle.stop();
            handle.stopped().await;
            tracing::info!("RPC server stopped");
        }

        Ok(())
    }
}
