use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use profile_directory::{ProfileDirectoryConfig, StorageBackend};
use serde::{Deserialize, Serialize};

/// Effective server configuration.
///
/// Layers, lowest precedence first: built-in defaults, the YAML file given
/// with `--config`, `APP__`-prefixed environment variables (`__` separates
/// nesting levels, e.g. `APP__SERVER__PORT`), then CLI overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: ProfileDirectoryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Requests running longer than this are answered with 504.
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
    pub cors_enabled: bool,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_owned(),
            port: 5000,
            request_timeout_secs: 30,
            body_limit_bytes: 1024 * 1024,
            cors_enabled: false,
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: ["GET", "POST", "PATCH", "DELETE", "OPTIONS"]
                .map(str::to_owned)
                .to_vec(),
            allowed_headers: vec!["*".to_owned()],
            allow_credentials: false,
            max_age_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `profile_directory=debug,info`.
    /// `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Overrides coming from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    /// Fails if `path` does not exist or any layer cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        if cli.mock {
            self.storage.backend = StorageBackend::Memory;
            self.storage.dsn = None;
        }
    }

    /// Address the HTTP listener binds to.
    ///
    /// # Errors
    /// Fails when `server.bind_addr` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.server.bind_addr, self.server.port);
        raw.parse()
            .with_context(|| format!("invalid bind address '{raw}'"))
    }

    /// Semantic checks that deserialization alone cannot express.
    ///
    /// # Errors
    /// Describes the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.storage.backend == StorageBackend::Database && self.storage.dsn.is_none() {
            anyhow::bail!("storage.dsn is required when storage.backend is 'database'");
        }
        if self.server.cors_enabled
            && self.server.cors.allow_credentials
            && self.server.cors.allowed_origins.iter().any(|o| o == "*")
        {
            anyhow::bail!(
                "invalid CORS config: allowed_origins ['*'] cannot be combined with allow_credentials"
            );
        }
        Ok(())
    }

    /// Render as YAML.
    ///
    /// # Errors
    /// Serialization failure.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).map_err(|e| anyhow::anyhow!("failed to render config: {e}"))
    }
}
