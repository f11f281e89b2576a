//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default directory holding the catalog file.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default catalog file name.
pub const DEFAULT_CATALOG_FILE: &str = "cocktails.csv";

/// Default snapshot endpoint.
pub const DEFAULT_SNAPSHOT_URL: &str =
    "https://www.thecocktaildb.com/api/json/v1/1/search.php?f=a";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Catalog file and snapshot endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub snapshot_url: String,
}

impl CatalogConfig {
    /// Full path of the catalog file.
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("BARCAT_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("BARCAT_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: std::env::var("BARCAT_SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            catalog: CatalogConfig {
                data_dir: std::env::var("BARCAT_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
                file_name: std::env::var("BARCAT_CATALOG_FILE")
                    .unwrap_or_else(|_| DEFAULT_CATALOG_FILE.to_string()),
                snapshot_url: std::env::var("BARCAT_SNAPSHOT_URL")
                    .unwrap_or_else(|_| DEFAULT_SNAPSHOT_URL.to_string()),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.catalog.file_name.is_empty() {
            anyhow::bail!("Catalog file name cannot be empty");
        }

        if !self.catalog.snapshot_url.starts_with("http://")
            && !self.catalog.snapshot_url.starts_with("https://")
        {
            anyhow::bail!(
                "Snapshot URL must start with http:// or https://, got {}",
                self.catalog.snapshot_url
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            catalog: CatalogConfig {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                file_name: DEFAULT_CATALOG_FILE.to_string(),
                snapshot_url: DEFAULT_SNAPSHOT_URL.to_string(),
            },
        }
    }
}
