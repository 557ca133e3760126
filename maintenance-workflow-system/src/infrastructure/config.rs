use std::time::Duration;

use serde::Deserialize;
use service_maintenance::WorkflowSettings;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::Directive;

#[derive(Default, Clone, Deserialize, Debug)]
pub struct MaintenanceConfig {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub external: ExternalConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Clone, Deserialize, Debug)]
pub struct HostConfig {
    #[serde(default = "HostConfig::default_address")]
    pub bind_address: String,
    #[serde(default = "HostConfig::default_port")]
    pub bind_port: u16,
}

impl HostConfig {
    fn default_address() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        80
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::default_address(),
            bind_port: Self::default_port(),
        }
    }
}

/// Console logging.
#[derive(Clone, Deserialize, Debug)]
pub struct TelemetryConfig {
    #[serde(default = "default_enabled")]
    pub enable: bool,
    /// Level used when the filter does not say otherwise.
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// `EnvFilter` directives, e.g. `service_maintenance=debug`.
    #[serde(default)]
    pub level_filter: String,
    /// Adds file, line, thread and target to every event.
    #[serde(default)]
    pub enable_debug_logging: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: default_enabled(),
            max_level: Default::default(),
            level_filter: Default::default(),
            enable_debug_logging: Default::default(),
        }
    }
}

#[derive(Default, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

impl From<LoggingLevel> for Directive {
    fn from(val: LoggingLevel) -> Self {
        let level: LevelFilter = val.into();
        level.into()
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct WorkflowConfig {
    #[serde(default = "WorkflowConfig::default_transaction_timeout")]
    pub transaction_timeout_secs: u64,
    #[serde(default = "WorkflowConfig::default_anomaly_sync_timeout")]
    pub anomaly_sync_timeout_secs: u64,
}

impl WorkflowConfig {
    fn default_transaction_timeout() -> u64 {
        30
    }

    fn default_anomaly_sync_timeout() -> u64 {
        5
    }

    pub fn settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            transaction_timeout: Duration::from_secs(self.transaction_timeout_secs),
            anomaly_sync_timeout: Duration::from_secs(self.anomaly_sync_timeout_secs),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            transaction_timeout_secs: Self::default_transaction_timeout(),
            anomaly_sync_timeout_secs: Self::default_anomaly_sync_timeout(),
        }
    }
}

/// Collaborator systems. Without a base url the matching client is replaced
/// by a local fallback.
#[derive(Clone, Deserialize, Debug)]
pub struct ExternalConfig {
    #[serde(default)]
    pub anomaly_base_url: Option<String>,
    #[serde(default)]
    pub asset_base_url: Option<String>,
    #[serde(default = "ExternalConfig::default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "ExternalConfig::default_user_agent")]
    pub user_agent: String,
}

impl ExternalConfig {
    fn default_request_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        format!("maintenance-workflow-system/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            anomaly_base_url: None,
            asset_base_url: None,
            request_timeout_secs: Self::default_request_timeout(),
            user_agent: Self::default_user_agent(),
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct DatabaseConfig {
    /// SQLite url, `sqlite::memory:` for a throwaway database.
    #[serde(default = "DatabaseConfig::default_url")]
    pub url: String,
}

impl DatabaseConfig {
    fn default_url() -> String {
        "sqlite://maintenance.db?mode=rwc".to_string()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// `config.yaml` in the working directory, then every yaml file named on the
/// command line, then `MAINTENANCE__*` environment variables.
pub fn build_config() -> anyhow::Result<config::Config> {
    let mut config = config::Config::builder().add_source(
        config::File::with_name("config")
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for arg in std::env::args().skip(1) {
        if arg.ends_with("yaml") || arg.ends_with("yml") {
            config = config.add_source(
                config::File::from(std::path::Path::new(arg.as_str()))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            );
        }
    }
    config = config.add_source(
        config::Environment::with_prefix("MAINTENANCE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(config.build()?)
}
