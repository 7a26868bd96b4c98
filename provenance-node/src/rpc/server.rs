use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use jsonrpsee::server::{ServerBuilder, ServerHandle};

use provenance_registry::engine::Registry;

use super::auth::RpcAuthConfig;
use super::handlers::{RegistryRpcImpl, RegistryRpcServer};
use crate::error::NodeError;

/// Start the JSON-RPC HTTP+WS server.
pub async fn start_rpc_server(
    addr: &str,
    registry: Arc<RwLock<Registry>>,
    auth: RpcAuthConfig,
) -> Result<ServerHandle, NodeError> {
    let server = ServerBuilder::default()
        .build(addr)
        .await
        .map_err(|e| NodeError::RpcError {
            reason: format!("failed to build RPC server: {}", e),
        })?;

    let rpc_impl = RegistryRpcImpl {
        registry,
        auth,
        started_at: Instant::now(),
    };

    let handle = server.start(rpc_impl.into_rpc());

    tracing::info!(addr = %addr, "RPC server started");

    Ok(handle)
}
