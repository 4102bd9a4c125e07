//! CLI error types with miette diagnostics.
//!
//! Maps core/config errors into user-facing errors with actionable help
//! text and stable exit codes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use netaudit_core::CoreError;

/// Exit codes.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const INPUT: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No profile named '{profile}'")]
    #[diagnostic(
        code(netaudit::no_profile),
        help("Check {path} for the available profiles, or pass --profile.")
    )]
    NoProfile { profile: String, path: String },

    #[error("Profile '{profile}' has no {endpoint} endpoint configured")]
    #[diagnostic(
        code(netaudit::no_endpoint),
        help("Add a [profiles.{profile}.{endpoint}] section to the config file.")
    )]
    NoEndpoint { profile: String, endpoint: String },

    #[error("Configuration error")]
    #[diagnostic(code(netaudit::config))]
    Config(#[from] netaudit_config::ConfigError),

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(netaudit::validation))]
    Validation { field: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication to {endpoint} failed")]
    #[diagnostic(
        code(netaudit::auth_failed),
        help(
            "Verify the username/password for this endpoint.\n\
             Set the password via the profile's password_env variable to avoid prompts."
        )
    )]
    AuthFailed { endpoint: String },

    // ── Input files ──────────────────────────────────────────────────
    #[error("Cannot read {path}")]
    #[diagnostic(code(netaudit::input), help("{reason}"))]
    Input { path: PathBuf, reason: String },

    #[error("--check requires --neighbors")]
    #[diagnostic(
        code(netaudit::missing_neighbors),
        help("Pass the observed neighbor capture with --neighbors <FILE>.")
    )]
    CheckWithoutNeighbors,

    // ── Wrapped layers ───────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(netaudit::core))]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    #[diagnostic(code(netaudit::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoProfile { .. }
            | Self::NoEndpoint { .. }
            | Self::Validation { .. }
            | Self::CheckWithoutNeighbors => exit_code::USAGE,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Input { .. } => exit_code::INPUT,
            Self::Core(CoreError::ConnectionFailed { .. }) => exit_code::CONNECTION,
            Self::Core(CoreError::AuthenticationFailed { .. }) => exit_code::AUTH,
            Self::Config(_) | Self::Core(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}
