//! Environment overrides for the credential cookies.

use crate::schema::GemwebConfig;
use tracing::debug;

pub const ENV_SECURE_1PSID: &str = "GEMWEB_SECURE_1PSID";
pub const ENV_SECURE_1PSIDTS: &str = "GEMWEB_SECURE_1PSIDTS";

/// Replace the file's cookies with any set in the process environment.
pub fn apply_env_overrides(config: &mut GemwebConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Empty values are ignored.
pub fn apply_overrides_from<F>(config: &mut GemwebConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_SECURE_1PSID).filter(|v| !v.is_empty()) {
        debug!("{ENV_SECURE_1PSID} overrides configured cookie");
        config.credentials.secure_1psid = value;
    }
    if let Some(value) = lookup(ENV_SECURE_1PSIDTS).filter(|v| !v.is_empty()) {
        debug!("{ENV_SECURE_1PSIDTS} overrides configured cookie");
        config.credentials.secure_1psidts = value;
    }
}
