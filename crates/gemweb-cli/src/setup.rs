//! Turning loaded configuration into a ready client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gemweb_client::{ClientConfig, Credentials, Endpoints, SessionState};
use gemweb_common::{ConfigError, GemwebError};
use gemweb_config::toml_loader::{default_config_path, ENV_SECURE_1PSIDTS};
use gemweb_config::GemwebConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::ResumeArgs;

pub const DEFAULT_LOG_DIRECTIVE: &str = "gemweb=info";

/// Install the tracing subscriber.
///
/// A bare level such as `debug` applies to every gemweb crate; anything
/// containing `=` is taken as a full filter directive. `RUST_LOG` still
/// contributes its own directives.
pub fn init_logging(level: Option<&str>) {
    let directive = log_directive(level);
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            eprintln!("ignoring log level {directive:?}: {e}");
            filter.add_directive(LevelFilter::INFO.into())
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn log_directive(level: Option<&str>) -> String {
    match level {
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("gemweb={level}"),
        None => DEFAULT_LOG_DIRECTIVE.to_string(),
    }
}

/// Load the config from `--config` or the platform default.
pub fn load(path: Option<&Path>) -> Result<GemwebConfig, ConfigError> {
    match path {
        Some(path) => gemweb_config::load_config_from(path),
        None => gemweb_config::load_config(),
    }
}

/// Where a rotated cookie should be written back, if anywhere.
///
/// Nothing is stored when the cookie came from the environment.
pub fn persist_path(explicit: Option<&Path>) -> Option<PathBuf> {
    persist_target(explicit, std::env::var(ENV_SECURE_1PSIDTS).ok())
}

fn persist_target(explicit: Option<&Path>, env_rotating: Option<String>) -> Option<PathBuf> {
    // an empty variable does not override the file
    if env_rotating.is_some_and(|v| !v.is_empty()) {
        return None;
    }
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().ok(),
    }
}

pub fn credentials(config: &GemwebConfig) -> Result<Credentials, GemwebError> {
    let creds = &config.credentials;
    if creds.secure_1psid.trim().is_empty() {
        return Err(ConfigError::MissingCredentials(
            "set credentials.secure_1psid in the config file or GEMWEB_SECURE_1PSID".into(),
        )
        .into());
    }
    Ok(Credentials::new(
        creds.secure_1psid.trim(),
        creds.secure_1psidts.trim(),
    ))
}

pub fn client_config(config: &GemwebConfig) -> ClientConfig {
    let mut endpoints = Endpoints::default();
    let overrides = &config.endpoints;
    if let Some(url) = &overrides.landing {
        endpoints.landing = url.clone();
    }
    if let Some(url) = &overrides.generate {
        endpoints.generate = url.clone();
    }
    if let Some(url) = &overrides.rotate {
        endpoints.rotate = url.clone();
    }
    if let Some(url) = &overrides.upload {
        endpoints.upload = url.clone();
    }

    let mut client = ClientConfig::new()
        .with_endpoints(endpoints)
        .with_locale(config.client.locale.clone())
        .with_timeouts(
            Duration::from_secs(config.client.connect_timeout_secs.into()),
            Duration::from_secs(config.client.request_timeout_secs.into()),
        );
    if let Some(user_agent) = &config.client.user_agent {
        client = client.with_user_agent(user_agent.clone());
    }
    client
}

pub fn session_state(resume: &ResumeArgs) -> SessionState {
    SessionState {
        cid: resume.cid.clone(),
        rid: resume.rid.clone(),
        rcid: resume.rcid.clone(),
    }
}
