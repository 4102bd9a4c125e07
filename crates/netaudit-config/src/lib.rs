//! Shared configuration for the netaudit CLI.
//!
//! TOML profiles, credential resolution (env + plaintext), and
//! translation into transport settings for the controller clients.
//! Interactive password prompting stays in the CLI crate; this crate
//! only answers "what do we know without asking".

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netaudit_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for {endpoint} in profile '{profile}'")]
    NoCredentials { profile: String, endpoint: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named profiles, one per managed environment.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds to wait for the topology to stabilize before sampling
    /// neighbor data.
    #[serde(default = "default_settle_delay")]
    pub settle_delay: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            settle_delay: default_settle_delay(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_settle_delay() -> u64 {
    90
}

/// A named profile: one managed environment with its controllers.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Fabric controller endpoint, if this environment has one.
    pub fabric: Option<Endpoint>,

    /// SD-WAN controller endpoint, if this environment has one.
    pub sdwan: Option<Endpoint>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override topology settle delay (seconds).
    pub settle_delay: Option<u64>,
}

/// One controller endpoint with its credential sources.
#[derive(Debug, Deserialize, Serialize)]
pub struct Endpoint {
    /// Controller base URL (e.g. "https://10.0.0.1").
    pub url: String,

    pub username: Option<String>,

    /// Password in plaintext (prefer the env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "netops-tools", "netaudit").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netaudit");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path merged with `NETAUDIT_*`
/// environment variables.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETAUDIT_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an endpoint password from the credential chain.
///
/// Order: named env var, then plaintext in the config. `None` means the
/// caller should prompt interactively.
pub fn resolve_password(endpoint: &Endpoint) -> Option<SecretString> {
    if let Some(ref env_name) = endpoint.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    endpoint
        .password
        .as_ref()
        .map(|pw| SecretString::from(pw.clone()))
}

// ── Transport translation ───────────────────────────────────────────

/// Build a `TransportConfig` for an endpoint from profile + defaults.
pub fn transport_for(
    endpoint: &Endpoint,
    profile: &Profile,
    defaults: &Defaults,
    insecure_flag: bool,
) -> TransportConfig {
    let insecure = insecure_flag || profile.insecure.unwrap_or(defaults.insecure);

    let tls = if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca) = endpoint.ca_cert {
        TlsMode::CustomCa(ca.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        cookie_jar: None,
    }
}

/// The topology settle delay for a profile.
pub fn settle_delay(profile: &Profile, defaults: &Defaults) -> Duration {
    Duration::from_secs(profile.settle_delay.unwrap_or(defaults.settle_delay))
}

/// Parse and validate an endpoint URL.
pub fn endpoint_url(endpoint: &Endpoint) -> Result<url::Url, ConfigError> {
    endpoint.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", endpoint.url),
    })
}
