//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# gemweb configuration
# Only override what you want to change -- missing fields use defaults.

[credentials]
# Copy both cookies from a signed-in browser session on gemini.google.com.
# GEMWEB_SECURE_1PSID / GEMWEB_SECURE_1PSIDTS override these when set.
secure_1psid = ""
secure_1psidts = ""

[client]
# locale = "en"
# user_agent = "Mozilla/5.0 ..."
# connect_timeout_secs = 10     # 1-600
# request_timeout_secs = 120    # 1-600

[rotation]
# enabled = true
# interval_secs = 600           # 60-86400

[endpoints]
# landing = "https://gemini.google.com/app"
# generate = "https://gemini.google.com/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate"
# rotate = "https://accounts.google.com/RotateCookies"
# upload = "https://content-push.googleapis.com/upload"

[logging]
# level = "info"                # trace, debug, info, warn, error
"##
    .to_string()
}
