use thiserror::Error;

/// Errors that can occur in the node.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] provenance_storage::error::StorageError),

    #[error("engine error: {0}")]
    EngineError(#[from] provenance_registry::error::EngineError),

    #[error("rpc error: {reason}")]
    RpcError { reason: String },

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
