use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use jsonrpsee::core::async_trait;
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;

use provenance_registry::engine::Registry;
use provenance_registry::error::EngineError;
use provenance_types::primitives::{ContentId, Principal};

use super::auth::RpcAuthConfig;
use super::types::{AckResult, AdminInfo, HealthInfo, OwnerInfo, VerifyResult};

/// JSON-RPC error code for a rejected API key on a mutation method.
const UNAUTHORIZED_CODE: i32 = -32001;

/// JSON-RPC error code for host-side faults (storage).
const INTERNAL_ERROR_CODE: i32 = -32603;

/// JSON-RPC trait for the registry node.
///
/// `caller` is taken at face value as the transaction sender; the
/// surrounding deployment is responsible for authenticating it. Registry
/// rejections surface as JSON-RPC errors whose code is the contract's
/// stable wire code (100, 101, 102, 104, 105).
#[rpc(server)]
pub trait RegistryRpc {
    /// Register a content id to the caller (admin only).
    #[method(name = "registry_register")]
    async fn register(
        &self,
        caller: String,
        content_id: String,
        api_key: Option<String>,
    ) -> Result<AckResult, ErrorObjectOwned>;

    /// Transfer a content id to a new owner (current owner only).
    #[method(name = "registry_transfer")]
    async fn transfer(
        &self,
        caller: String,
        content_id: String,
        new_owner: String,
        api_key: Option<String>,
    ) -> Result<AckResult, ErrorObjectOwned>;

    /// Verify that a principal is the registered creator of a content id.
    #[method(name = "registry_verify")]
    async fn verify(
        &self,
        content_id: String,
        creator: String,
    ) -> Result<VerifyResult, ErrorObjectOwned>;

    /// Rotate the admin role (current admin only).
    #[method(name = "registry_setAdmin")]
    async fn set_admin(
        &self,
        caller: String,
        new_admin: String,
        api_key: Option<String>,
    ) -> Result<AckResult, ErrorObjectOwned>;

    /// Get the current owner of a content id, if registered.
    #[method(name = "registry_getOwner")]
    async fn get_owner(&self, content_id: String) -> Result<Option<OwnerInfo>, ErrorObjectOwned>;

    /// Get the current admin.
    #[method(name = "registry_getAdmin")]
    async fn get_admin(&self) -> Result<AdminInfo, ErrorObjectOwned>;

    /// Health check endpoint.
    #[method(name = "registry_health")]
    async fn health(&self) -> Result<HealthInfo, ErrorObjectOwned>;
}

/// Implementation of the RegistryRpc trait.
pub struct RegistryRpcImpl {
    pub registry: Arc<RwLock<Registry>>,
    pub auth: RpcAuthConfig,
    pub started_at: Instant,
}

/// Map an engine failure to a JSON-RPC error object. Registry rejections
/// keep their wire code; storage faults become internal errors.
fn to_rpc_error(err: EngineError) -> ErrorObjectOwned {
    match err.wire_code() {
        Some(code) => ErrorObjectOwned::owned(code as i32, err.to_string(), None::<()>),
        None => ErrorObjectOwned::owned(INTERNAL_ERROR_CODE, err.to_string(), None::<()>),
    }
}

fn unauthorized() -> ErrorObjectOwned {
    ErrorObjectOwned::owned(
        UNAUTHORIZED_CODE,
        "unauthorized: invalid or missing API key",
        None::<()>,
    )
}

#[async_trait]
impl RegistryRpcServer for RegistryRpcImpl {
    async fn register(
        &self,
        caller: String,
        content_id: String,
        api_key: Option<String>,
    ) -> Result<AckResult, ErrorObjectOwned> {
        if !self.auth.check(api_key.as_deref()) {
            return Err(unauthorized());
        }
        let mut registry = self.registry.write().await;
        registry
            .register(&Principal::new(caller), ContentId::new(content_id))
            .map_err(to_rpc_error)?;
        Ok(AckResult { ok: true })
    }

    async fn transfer(
        &self,
        caller: String,
        content_id: String,
        new_owner: String,
        api_key: Option<String>,
    ) -> Result<AckResult, ErrorObjectOwned> {
        if !self.auth.check(api_key.as_deref()) {
            return Err(unauthorized());
        }
        let mut registry = self.registry.write().await;
        registry
            .transfer(
                &Principal::new(caller),
                ContentId::new(content_id),
                Principal::new(new_owner),
            )
            .map_err(to_rpc_error)?;
        Ok(AckResult { ok: true })
    }

    async fn verify(
        &self,
        content_id: String,
        creator: String,
    ) -> Result<VerifyResult, ErrorObjectOwned> {
        let registry = self.registry.read().await;
        let verified = registry
            .verify(&ContentId::new(content_id), &Principal::new(creator))
            .map_err(to_rpc_error)?;
        Ok(VerifyResult { verified })
    }

    async fn set_admin(
        &self,
        caller: String,
        new_admin: String,
        api_key: Option<String>,
    ) -> Result<AckResult, ErrorObjectOwned> {
        if !self.auth.check(api_key.as_deref()) {
            return Err(unauthorized());
        }
        let mut registry = self.registry.write().await;
        registry
            .set_admin(&Principal::new(caller), Principal::new(new_admin))
            .map_err(to_rpc_error)?;
        Ok(AckResult { ok: true })
    }

    async fn get_owner(&self, content_id: String) -> Result<Option<OwnerInfo>, ErrorObjectOwned> {
        let registry = self.registry.read().await;
        let id = ContentId::new(content_id);
        Ok(registry.owner_of(&id).map(|owner| OwnerInfo {
            content_id: id.to_string(),
            owner: owner.to_string(),
        }))
    }

    async fn get_admin(&self) -> Result<AdminInfo, ErrorObjectOwned> {
        let registry = self.registry.read().await;
        Ok(AdminInfo {
            admin: registry.admin().to_string(),
        })
    }

    async fn health(&self) -> Result<HealthInfo, ErrorObjectOwned> {
        let registry = self.registry.read().await;
        Ok(HealthInfo {
            status: "ok".to_string(),
            entries: registry.entry_count() as u64,
            uptime_secs: self.started_at.elapsed().as_secs(),
        })
    }
}
