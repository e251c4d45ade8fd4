//! Config serialization to TOML
//!
//! Single source of truth for the config file format: `config --reset` and
//! first-run creation both write `Config::default().to_toml()`.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    ///
    /// An unset API key is written as a commented-out placeholder.
    pub fn to_toml(&self) -> String {
        let api_key_line = match &self.api_key {
            Some(key) => format!("api_key = {:?}", key),
            None => "# api_key = \"<public anon key>\"   # or set TIL_API_KEY".to_string(),
        };

        format!(
            r#"# til configuration
# Precedence: environment variables > this file > built-in defaults

# Hosted project URL; the fact table is served under /rest/v1/<table>
# Env: TIL_STORE_URL
store_url = {store_url:?}

{api_key_line}

# Table holding the facts
table = {table:?}

# Maximum facts fetched per list query (env: TIL_FETCH_LIMIT)
fetch_limit = {fetch_limit}

# Request timeout in seconds (0 = transport default)
request_timeout_secs = {timeout}

# Color theme: "dark" or "light" (env: TIL_THEME)
theme = {theme:?}

[logging]
# trace, debug, info, warn, error (RUST_LOG overrides)
level = {level:?}
# Write JSON logs to file_dir in addition to the in-app log view
file_enabled = {file_enabled}
file_dir = {file_dir:?}
# hourly, daily, never
file_rotation = {file_rotation:?}
file_prefix = {file_prefix:?}
"#,
            store_url = self.store_url,
            api_key_line = api_key_line,
            table = self.table,
            fetch_limit = self.fetch_limit,
            timeout = self.request_timeout_secs,
            theme = self.theme,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}
