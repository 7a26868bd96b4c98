use clap::{Parser, Subcommand};

use crate::config::NodeConfig;
use crate::error::NodeError;

#[derive(Parser)]
#[command(
    name = "provenance",
    about = "Provenance Registry Node — content ownership registry with creator verification",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the node
    Run {
        /// Path to config file
        #[arg(short, long, default_value = "provenance.toml")]
        config: String,
        /// Start in dev mode (SQLite storage, default dev admin, local RPC)
        #[arg(long)]
        dev: bool,
        /// Override RPC listen address (e.g., "0.0.0.0:9851" for LAN access)
        #[arg(long)]
        rpc_addr: Option<String>,
        /// Storage backend: "sqlite" (default for --dev) or "memory"
        #[arg(long)]
        storage: Option<String>,
        /// Override data directory path
        #[arg(long)]
        data_dir: Option<String>,
        /// Override the genesis admin principal (only used on an empty store)
        #[arg(long)]
        admin: Option<String>,
        /// Wipe the data directory before starting (useful after breaking upgrades)
        #[arg(long)]
        reset_state: bool,
    },
    /// Initialize a new node configuration
    Init {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: String,
    },
}

pub async fn run(cli: Cli) -> Result<(), NodeError> {
    match cli.command {
        Command::Run {
            config,
            dev,
            rpc_addr,
            storage,
            data_dir,
            admin,
            reset_state,
        } => {
            let mut config = if dev {
                let mut cfg = NodeConfig::default();
                cfg.storage.db_type = "sqlite".to_string();
                cfg.rpc.enabled = true;
                cfg.rpc.listen_addr = "127.0.0.1:9851".to_string();
                cfg
            } else {
                NodeConfig::load(&config)?
            };

            // Apply CLI overrides.
            if let Some(addr) = rpc_addr {
                config.rpc.listen_addr = addr;
            }
            if let Some(db) = storage {
                config.storage.db_type = db;
            }
            if let Some(dir) = data_dir {
                config.storage.data_dir = dir;
            }
            if let Some(principal) = admin {
                config.genesis.admin = principal;
            }

            // Wipe data directory if requested.
            if reset_state {
                let data_dir = &config.storage.data_dir;
                let path = std::path::Path::new(data_dir);
                if path.exists() {
                    tracing::warn!(data_dir = %data_dir, "wiping data directory (--reset-state)");
                    std::fs::remove_dir_all(path)?;
                    tracing::info!("data directory removed, starting with fresh state");
                } else {
                    tracing::info!(data_dir = %data_dir, "data directory does not exist, nothing to reset");
                }
            }

            // Print compact startup summary.
            {
                let dim = console::Style::new().dim();
                let cyan = console::Style::new().cyan();
                let mode = if dev {
                    format!("dev · {} storage", config.storage.db_type)
                } else {
                    format!("config · {} storage", config.storage.db_type)
                };
                println!(
                    "  {} {}",
                    dim.apply_to("Listen "),
                    cyan.apply_to(&config.rpc.listen_addr),
                );
                println!("  {} {}", dim.apply_to("Mode   "), cyan.apply_to(mode));
                println!(
                    "  {} {}",
                    dim.apply_to("Admin  "),
                    cyan.apply_to(&config.genesis.admin),
                );
                println!();
            }

            let mut node = crate::node::Node::new(config).await?;
            node.run().await
        }
        Command::Init { dir } => {
            NodeConfig::init(&dir)?;
            tracing::info!("Node configuration initialized in {}", dir);
            Ok(())
        }
    }
}
