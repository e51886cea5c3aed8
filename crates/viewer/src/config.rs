use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerConfig {
    pub server: ServerConfig,
    pub logs: LogsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub write_timeout_secs: u64,
    pub enable_cors: bool,
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Show error details on error pages
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogsConfig {
    /// Directory holding the log files (created at startup if missing)
    pub directory: String,
    /// Files larger than this are refused before rendering
    pub max_file_bytes: u64,
    /// Fixed offset used to display modification times
    pub utc_offset_hours: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    File { path: String },
}

impl ViewerConfig {
    /// Load configuration from viewer.toml and environment variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = config::Config::try_from(&ViewerConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);

        // 1. /etc/log-viewer/viewer.toml (production)
        // 2. config/viewer.toml (local development)
        // 3. crates/viewer/config/viewer.toml (workspace root)
        let config_paths = vec![
            "/etc/log-viewer/viewer",
            "config/viewer",
            "crates/viewer/config/viewer",
        ];

        for path in config_paths {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Double underscore for nested keys: VIEWER_SERVER__BIND_ADDRESS
        builder = builder.add_source(
            config::Environment::with_prefix("VIEWER")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_address
            .parse::<std::net::SocketAddr>()
            .context("Invalid bind_address")?;

        if self.logs.max_file_bytes == 0 {
            anyhow::bail!("logs.max_file_bytes must be greater than zero");
        }

        if !(-23..=23).contains(&self.logs.utc_offset_hours) {
            anyhow::bail!(
                "logs.utc_offset_hours out of range: {} (expected -23..=23)",
                self.logs.utc_offset_hours
            );
        }

        if self.logs.directory.trim().is_empty() {
            anyhow::bail!("logs.directory must not be empty");
        }

        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0:5001".to_string(),
                write_timeout_secs: 30,
                enable_cors: true,
                cors_origins: vec![],
                debug: false,
            },
            logs: LogsConfig {
                directory: "log".to_string(),
                max_file_bytes: 10 * 1024 * 1024,
                utc_offset_hours: 8,
            },
            logging: LoggingConfig {
                level: "info,viewer=debug".to_string(),
                format: LogFormat::Pretty,
                output: LogOutput::Stdout,
            },
        }
    }
}
