use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "tutorhub.toml",
    "config/tutorhub.toml",
    "crates/config/tutorhub.toml",
    "../tutorhub.toml",
    "../config/tutorhub.toml",
    "../crates/config/tutorhub.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://tutorhub.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: Self::default_session_ttl(),
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        86_400
    }
}

/// Tunables for the class/session workflows.
///
/// ```
/// use tutorhub_config::WorkflowConfig;
///
/// let workflow = WorkflowConfig::default();
/// assert_eq!(workflow.join_redirect_delay_ms, 300);
/// assert_eq!(workflow.request_token_window_seconds, 600);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// How long a client should keep the join confirmation visible before
    /// navigating back to the class directory.
    #[serde(default = "WorkflowConfig::default_join_redirect_delay")]
    pub join_redirect_delay_ms: u64,
    /// Window during which a replayed session request token returns the
    /// session it already created.
    #[serde(default = "WorkflowConfig::default_request_token_window")]
    pub request_token_window_seconds: u64,
}

impl WorkflowConfig {
    const fn default_join_redirect_delay() -> u64 {
        300
    }

    const fn default_request_token_window() -> u64 {
        600
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            join_redirect_delay_ms: Self::default_join_redirect_delay(),
            request_token_window_seconds: Self::default_request_token_window(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use tutorhub_config::load;
///
/// std::env::remove_var("TUTORHUB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let db_max = i64::from(defaults.database.max_connections);
    let session_ttl = i64::try_from(defaults.auth.session_ttl_seconds).unwrap_or(i64::MAX);
    let redirect_delay =
        i64::try_from(defaults.workflow.join_redirect_delay_ms).unwrap_or(i64::MAX);
    let token_window =
        i64::try_from(defaults.workflow.request_token_window_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default("database.max_connections", db_max)?
        .set_default("auth.session_ttl_seconds", session_ttl)?
        .set_default("workflow.join_redirect_delay_ms", redirect_delay)?
        .set_default("workflow.request_token_window_seconds", token_window)?;

    let environment_overrides = config::Environment::with_prefix("TUTORHUB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("TUTORHUB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via TUTORHUB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
