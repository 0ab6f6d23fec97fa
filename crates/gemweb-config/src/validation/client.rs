//! Validation for the client, rotation and endpoint sections.

use crate::schema::GemwebConfig;

use super::helpers::{validate_http_url, validate_non_empty, validate_range};

pub(crate) fn validate_client(errors: &mut Vec<String>, config: &GemwebConfig) {
    let client = &config.client;
    validate_non_empty(errors, "client.locale", &client.locale);
    if let Some(user_agent) = &client.user_agent {
        validate_non_empty(errors, "client.user_agent", user_agent);
    }
    validate_range(
        errors,
        "client.connect_timeout_secs",
        client.connect_timeout_secs,
        1,
        600,
    );
    validate_range(
        errors,
        "client.request_timeout_secs",
        client.request_timeout_secs,
        1,
        600,
    );
}

pub(crate) fn validate_rotation(errors: &mut Vec<String>, config: &GemwebConfig) {
    validate_range(
        errors,
        "rotation.interval_secs",
        config.rotation.interval_secs,
        60,
        86400,
    );
}

pub(crate) fn validate_endpoints(errors: &mut Vec<String>, config: &GemwebConfig) {
    for (name, url) in config.endpoints.overrides() {
        validate_http_url(errors, &format!("endpoints.{name}"), url);
    }
}
