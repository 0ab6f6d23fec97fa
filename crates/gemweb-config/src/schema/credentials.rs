use serde::{Deserialize, Serialize};
use std::fmt;

/// Session cookies copied from a signed-in browser.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Value of the `__Secure-1PSID` cookie.
    pub secure_1psid: String,
    /// Value of the `__Secure-1PSIDTS` cookie. Some accounts work without it.
    pub secure_1psidts: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("secure_1psid", &redact(&self.secure_1psid))
            .field("secure_1psidts", &redact(&self.secure_1psidts))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "[REDACTED]"
    }
}
