//! Shared helpers for command handlers.

use secrecy::SecretString;

use netaudit_config::{Config, Endpoint, Profile};
use netaudit_core::ControllerCredentials;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file, honoring the `--config` override.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    match global.config {
        Some(ref path) => Ok(netaudit_config::load_config_from(path)?),
        None => Ok(netaudit_config::load_config_or_default()),
    }
}

/// The active profile name: `--profile` flag, then the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Look up the active profile, failing with a pointer at the config file.
pub fn active_profile<'a>(
    global: &GlobalOpts,
    cfg: &'a Config,
) -> Result<(String, &'a Profile), CliError> {
    let name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&name).ok_or_else(|| CliError::NoProfile {
        profile: name.clone(),
        path: netaudit_config::config_path().display().to_string(),
    })?;
    Ok((name, profile))
}

/// Resolve credentials for an endpoint, prompting when the config chain
/// comes up empty.
pub fn credentials_for(endpoint: &Endpoint, label: &str) -> Result<ControllerCredentials, CliError> {
    let username = match endpoint.username {
        Some(ref u) => u.clone(),
        None => prompt_line(&format!("Username for {label}: "))?,
    };

    let password = match netaudit_config::resolve_password(endpoint) {
        Some(secret) => secret,
        None => {
            let pw = rpassword::prompt_password(format!("Password for {label}: "))?;
            SecretString::from(pw)
        }
    };

    Ok(ControllerCredentials { username, password })
}

fn prompt_line(prompt: &str) -> Result<String, CliError> {
    use std::io::Write as _;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
