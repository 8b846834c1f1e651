//! Typed, env-driven configuration assembled once at process start.
//!
//! Grounded on the Python reference's `config.py` (`load_dotenv()` plus a flat module
//! of `os.getenv(...)` reads and a `str_to_bool` helper), reshaped into one immutable
//! struct the way `thiserror`-based config layers in the corpus are assembled.

use blkidx_core::Coin;
use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(String),

    #[error("environment variable {key} could not be parsed as {expected}: {value:?}")]
    Invalid {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("unrecognized coin argument {0:?} (expected \"bitcoin\" or \"litecoin\")")]
    UnknownCoin(String),

    #[error("unsupported DATABASE_TYPE {0:?}; only \"mongodb\" is recognized as a storage backend selector")]
    UnsupportedDatabaseType(String),
}

#[derive(Debug, Clone)]
pub struct NodeRpcConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub coin: Coin,
    pub blocks_path: PathBuf,
    pub database_type: String,
    pub use_rpc: bool,
    pub rpc: Option<NodeRpcConfig>,
    pub cli_path: Option<String>,
    pub rpc_timeout: Duration,
    pub max_connections: usize,
    pub max_keepalive_connections: usize,
    pub max_workers: usize,
    pub use_chunks: bool,
    pub chunk_size: usize,
    pub store_blocks: bool,
}

impl Config {
    /// Loads `.env` (if present) and builds the immutable config for the given coin.
    /// Parsing failures are fatal: there is no partial or lazily-resolved config.
    pub fn load(coin: Coin) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_type = env_or("DATABASE_TYPE", "mongodb");
        if database_type != "mongodb" {
            return Err(ConfigError::UnsupportedDatabaseType(database_type));
        }

        let use_rpc = parse_bool("USE_RPC", false)?;
        let use_chunks = parse_bool("USE_CHUNKS", false)?;
        let store_blocks = parse_bool("STORE_BLOCKS", false)?;

        let prefix = match coin {
            Coin::Bitcoin => "BITCOIN",
            Coin::Litecoin => "LITECOIN",
        };

        let blocks_path_key = format!("{prefix}_BLOCKS_PATH");
        let blocks_path =
            required_env(&blocks_path_key).map_err(|_| ConfigError::Missing(blocks_path_key.clone()))?;

        let rpc = if use_rpc {
            let host_key = format!("{prefix}_RPC_HOST");
            let port_key = format!("{prefix}_RPC_PORT");
            let user_key = format!("{prefix}_RPC_USER");
            let password_key = format!("{prefix}_RPC_PASSWORD");
            Some(NodeRpcConfig {
                host: required_env(&host_key).map_err(|_| ConfigError::Missing(host_key.clone()))?,
                port: parse_env(&port_key, default_rpc_port(coin))?,
                user: required_env(&user_key).map_err(|_| ConfigError::Missing(user_key.clone()))?,
                password: SecretString::new(
                    required_env(&password_key).map_err(|_| ConfigError::Missing(password_key.clone()))?,
                ),
            })
        } else {
            None
        };

        let cli_path = if use_rpc {
            None
        } else {
            let cli_path_key = format!("{prefix}_CLI_PATH");
            Some(required_env(&cli_path_key).map_err(|_| ConfigError::Missing(cli_path_key.clone()))?)
        };

        Ok(Config {
            coin,
            blocks_path: PathBuf::from(blocks_path),
            database_type,
            use_rpc,
            rpc,
            cli_path,
            rpc_timeout: Duration::from_secs_f64(parse_env("RPC_TIMEOUT", 5.0)?),
            max_connections: parse_env("MAX_CONNECTIONS", 100)?,
            max_keepalive_connections: parse_env("MAX_KEEPALIVE_CONNECTIONS", 20)?,
            max_workers: parse_env("MAX_WORKERS", 100)?,
            use_chunks,
            chunk_size: parse_env("CHUNK_SIZE", 1000)?,
            store_blocks,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn required_env(key: &str) -> Result<String, std::env::VarError> {
    std::env::var(key)
}

fn default_rpc_port(coin: Coin) -> u16 {
    match coin {
        Coin::Bitcoin => 8332,
        Coin::Litecoin => 9332,
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Clone,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

/// Matches the Python reference's `str_to_bool`: `true`/`1`/`yes`/`on` (case- and
/// whitespace-insensitive) are true, everything else (including unset) is false.
fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => Ok(matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        )),
        Err(_) => Ok(default),
    }
}
