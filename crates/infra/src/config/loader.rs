//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SOLVETRACK_SERVER_HOST`: Bind address
//! - `SOLVETRACK_SERVER_PORT`: Bind port
//! - `SOLVETRACK_DB_PATH`: Database file path
//! - `SOLVETRACK_DB_POOL_SIZE`: Connection pool size
//! - `SOLVETRACK_JWT_SECRET`: JWT signing secret
//! - `SOLVETRACK_TOKEN_TTL`: Access token lifetime in seconds
//! - `SOLVETRACK_SCRAPE_TIMEOUT`: HTTP timeout in seconds (optional)
//! - `SOLVETRACK_SCRAPE_USER_AGENT`: User-agent for page fetches (optional)

use std::path::{Path, PathBuf};

use solvetrack_domain::{
    AuthConfig, Config, DatabaseConfig, Result, ScrapeConfig, ServerConfig, SolveTrackError,
};

const CONFIG_FILENAMES: [&str; 4] =
    ["config.toml", "config.json", "solvetrack.toml", "solvetrack.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SolveTrackError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SolveTrackError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let host = env_var("SOLVETRACK_SERVER_HOST")?;
    let port = env_var("SOLVETRACK_SERVER_PORT").and_then(|s| {
        s.parse::<u16>().map_err(|e| SolveTrackError::Config(format!("Invalid port: {e}")))
    })?;

    let db_path = env_var("SOLVETRACK_DB_PATH")?;
    let db_pool_size = env_var("SOLVETRACK_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| SolveTrackError::Config(format!("Invalid pool size: {e}")))
    })?;

    let jwt_secret = env_var("SOLVETRACK_JWT_SECRET")?;
    let token_ttl_seconds = env_var("SOLVETRACK_TOKEN_TTL").and_then(|s| {
        s.parse::<i64>().map_err(|e| SolveTrackError::Config(format!("Invalid token TTL: {e}")))
    })?;

    let scrape_defaults = ScrapeConfig::default();
    let http_timeout_seconds = match std::env::var("SOLVETRACK_SCRAPE_TIMEOUT") {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| SolveTrackError::Config(format!("Invalid scrape timeout: {e}")))?,
        Err(_) => scrape_defaults.http_timeout_seconds,
    };
    let user_agent = std::env::var("SOLVETRACK_SCRAPE_USER_AGENT")
        .unwrap_or(scrape_defaults.user_agent);

    Ok(Config {
        server: ServerConfig { host, port },
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        auth: AuthConfig { jwt_secret, token_ttl_seconds },
        scrape: ScrapeConfig { http_timeout_seconds, user_agent },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the working directory and its parent for the
/// well-known file names. Supports both JSON and TOML formats (detected by
/// file extension).
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            SolveTrackError::Config("no config file found and environment incomplete".into())
        })?,
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        SolveTrackError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&raw)
            .map_err(|e| SolveTrackError::Config(format!("invalid TOML config: {e}")))?,
        Some("json") => serde_json::from_str(&raw)
            .map_err(|e| SolveTrackError::Config(format!("invalid JSON config: {e}")))?,
        _ => {
            return Err(SolveTrackError::Config(format!(
                "unsupported config format: {}",
                path.display()
            )))
        }
    };

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    for name in CONFIG_FILENAMES {
        candidates.push(PathBuf::from(name));
        candidates.push(PathBuf::from("..").join(name));
    }
    candidates.into_iter().find(|p| p.is_file())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SolveTrackError::Config(format!("missing environment variable: {key}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn toml_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 5000

[database]
path = "solvetrack.db"
pool_size = 5

[auth]
jwt_secret = "secret"
token_ttl_seconds = 3600

[scrape]
http_timeout_seconds = 10
user_agent = "Mozilla/5.0"
"#
        )
        .unwrap();

        let config = load_from_file(Some(&path)).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.scrape.http_timeout_seconds, 10);
    }

    #[test]
    fn unsupported_extension_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server:").unwrap();

        let err = load_from_file(Some(&path)).unwrap_err();
        assert!(matches!(err, SolveTrackError::Config(_)));
    }
}
