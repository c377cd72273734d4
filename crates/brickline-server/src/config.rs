//! Server configuration for Brickline intake.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `BRICKLINE_*` environment variables.

use std::net::SocketAddr;

use brickline_core::SchemaMode;

const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// When the registrations table is ensured.
    pub schema_mode: SchemaMode,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Maximum number of requests processed at once.
    pub concurrency_limit: usize,
    /// Origin allowed to call the API from a browser (`None` allows any).
    pub cors_origin: Option<String>,
}

/// Supported storage backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// `PostgreSQL` persistent storage.
    Postgres { url: String, max_connections: u32 },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `BRICKLINE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `BRICKLINE_STORAGE` — `memory` or `postgres` (default: `memory`)
    /// - `DATABASE_URL` / `POSTGRES_URL` — connection string for `postgres`
    /// - `BRICKLINE_DB_MAX_CONNECTIONS` — pool size (default: `10`)
    /// - `BRICKLINE_SCHEMA_MODE` — `startup` or `per-request` (default: `startup`)
    /// - `BRICKLINE_LOG_LEVEL` — log filter (default: `info`)
    /// - `BRICKLINE_MAX_BODY_BYTES` — request body limit (default: `16384`)
    /// - `BRICKLINE_CONCURRENCY_LIMIT` — in-flight request cap (default: `256`)
    /// - `BRICKLINE_CORS_ORIGIN` — allowed browser origin (default: any)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        // Priority: BRICKLINE_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = var("BRICKLINE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
        } else if let Some(port_str) = var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
        };

        let storage_backend = match var("BRICKLINE_STORAGE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => {
                let url = var("DATABASE_URL")
                    .or_else(|| var("POSTGRES_URL"))
                    .unwrap_or_else(|| "postgres://localhost/brickline".to_owned());
                let max_connections = var("BRICKLINE_DB_MAX_CONNECTIONS")
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(10);
                StorageBackendType::Postgres {
                    url,
                    max_connections,
                }
            }
            _ => StorageBackendType::Memory,
        };

        let schema_mode = var("BRICKLINE_SCHEMA_MODE")
            .and_then(|v| v.parse::<SchemaMode>().ok())
            .unwrap_or_default();

        let log_level = var("BRICKLINE_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let max_body_bytes = var("BRICKLINE_MAX_BODY_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(16 * 1024);

        let concurrency_limit = var("BRICKLINE_CONCURRENCY_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(256);

        let cors_origin = var("BRICKLINE_CORS_ORIGIN").filter(|v| !v.is_empty() && v != "*");

        Self {
            bind_addr,
            storage_backend,
            schema_mode,
            log_level,
            max_body_bytes,
            concurrency_limit,
            cors_origin,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(cfg.storage_backend, StorageBackendType::Memory);
        assert_eq!(cfg.schema_mode, SchemaMode::Startup);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.max_body_bytes, 16 * 1024);
        assert_eq!(cfg.concurrency_limit, 256);
        assert_eq!(cfg.cors_origin, None);
    }

    #[test]
    fn port_binds_all_interfaces_unless_bind_addr_set() {
        let cfg = config(&[("PORT", "8080")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));

        let cfg = config(&[("PORT", "8080"), ("BRICKLINE_BIND_ADDR", "127.0.0.1:9000")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn postgres_backend_reads_url_fallbacks() {
        let cfg = config(&[
            ("BRICKLINE_STORAGE", "Postgres"),
            ("POSTGRES_URL", "postgres://db/leads"),
            ("BRICKLINE_DB_MAX_CONNECTIONS", "4"),
        ]);
        assert_eq!(
            cfg.storage_backend,
            StorageBackendType::Postgres {
                url: "postgres://db/leads".to_owned(),
                max_connections: 4,
            }
        );

        let cfg = config(&[
            ("BRICKLINE_STORAGE", "postgres"),
            ("DATABASE_URL", "postgres://primary/leads"),
            ("POSTGRES_URL", "postgres://db/leads"),
        ]);
        assert!(matches!(
            cfg.storage_backend,
            StorageBackendType::Postgres { ref url, max_connections: 10 } if url == "postgres://primary/leads"
        ));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let cfg = config(&[
            ("BRICKLINE_SCHEMA_MODE", "sometimes"),
            ("BRICKLINE_MAX_BODY_BYTES", "lots"),
            ("BRICKLINE_CONCURRENCY_LIMIT", "0"),
            ("BRICKLINE_CORS_ORIGIN", "*"),
        ]);
        assert_eq!(cfg.schema_mode, SchemaMode::Startup);
        assert_eq!(cfg.max_body_bytes, 16 * 1024);
        assert_eq!(cfg.concurrency_limit, 256);
        assert_eq!(cfg.cors_origin, None);
    }

    #[test]
    fn per_request_schema_mode() {
        let cfg = config(&[("BRICKLINE_SCHEMA_MODE", "per-request")]);
        assert_eq!(cfg.schema_mode, SchemaMode::PerRequest);
    }
}
