//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# querydesk configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[remote]
# base_url = "http://127.0.0.1:8001"   # overridden by QUERYDESK_SERVER_URL
# connect_timeout_secs = 10             # 1-120
# request_timeout_secs = 120            # 1-600
# error_body_limit = 200                # 16-10000

[session]
# auto_fetch_schema = true

[display]
# max_rows = 50                         # 1-10000
# pretty_json = true

[logging]
# level = "INFO"                        # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
