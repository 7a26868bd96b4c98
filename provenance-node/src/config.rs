use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::NodeError;

/// Admin principal used by `--dev` and by freshly initialized config files.
/// Operators must replace it before a real deployment.
pub const DEV_ADMIN: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub storage: StorageConfig,
    pub rpc: RpcConfig,
    pub logging: LoggingConfig,
    pub genesis: GenesisSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Storage backend: "memory" or "sqlite"
    pub db_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub enabled: bool,
    pub listen_addr: String,
    /// Optional API key for RPC authentication.
    /// If set, mutation methods require it as their trailing `api_key` parameter.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Deployment-time seed values; only consulted on an empty store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisSection {
    /// The initial admin principal.
    pub admin: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: dirs::home_dir()
                    .map(|h| {
                        h.join(".provenance")
                            .join("data")
                            .to_string_lossy()
                            .into_owned()
                    })
                    .unwrap_or_else(|| "./provenance-data".to_string()),
                db_type: "memory".to_string(),
            },
            rpc: RpcConfig {
                enabled: true,
                listen_addr: "127.0.0.1:9851".to_string(),
                api_key: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            genesis: GenesisSection {
                admin: DEV_ADMIN.to_string(),
            },
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, NodeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: NodeConfig = toml::from_str(&contents).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to parse config file '{}': {}", path, e),
        })?;
        Ok(config)
    }

    /// Initialize a default configuration file in the given directory.
    pub fn init(dir: &str) -> Result<(), NodeError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let config = NodeConfig::default();
        let toml_str = toml::to_string_pretty(&config).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to serialize default config: {}", e),
        })?;

        let config_path = dir_path.join("provenance.toml");
        std::fs::write(&config_path, toml_str)?;

        Ok(())
    }
}
