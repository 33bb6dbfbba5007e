use std::env;
use std::str::FromStr;

use log::info;

use crate::error::ConfigError;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    MySql { database_url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub storage: StorageBackend,
    /// Browser origin allowed to call the API. Any origin when unset.
    pub client_url: Option<String>,
}

impl Config {
    /// Reads the process environment. `main` loads `.env` into it first.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_address = match (lookup("SERVER_ADDRESS"), lookup("PORT")) {
            (Some(address), _) => address,
            (None, Some(port)) => {
                let port: u16 = parse("PORT", &port)?;
                format!("0.0.0.0:{}", port)
            }
            (None, None) => {
                info!("SERVER_ADDRESS not set, using default: {}", DEFAULT_SERVER_ADDRESS);
                DEFAULT_SERVER_ADDRESS.to_string()
            }
        };

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "mysql".to_string());
        let storage = match backend.trim().to_ascii_lowercase().as_str() {
            "mysql" => {
                let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => parse("DATABASE_MAX_CONNECTIONS", &value)?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StorageBackend::MySql { database_url, max_connections }
            }
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: backend,
                })
            }
        };

        let client_url = lookup("CLIENT_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        if let Some(url) = &client_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid { key: "CLIENT_URL", value: url.clone() });
            }
        }
        if client_url.is_none() {
            info!("CLIENT_URL not set, accepting requests from any origin");
        }

        Ok(Config { server_address, storage, client_url })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
