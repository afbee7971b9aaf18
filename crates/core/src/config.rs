//! Populator configuration
//!
//! Endpoint and form id are fixed by the page contract; only diagnostics can
//! be switched on, through the page URL (`?settings_debug=1`).

use serde::Deserialize;

/// Relative path of the settings document
pub const DEFAULT_ENDPOINT: &str = "json";
/// Id of the form that receives the settings
pub const DEFAULT_FORM_ID: &str = "settings-form";

const DEBUG_PARAM: &str = "settings_debug";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopulatorConfig {
    pub endpoint: String,
    pub form_id: String,
    /// Emit diagnostics for each stage of the request
    pub debug: bool,
}

impl Default for PopulatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            form_id: DEFAULT_FORM_ID.to_string(),
            debug: false,
        }
    }
}

impl PopulatorConfig {
    /// Defaults, with debug taken from a `location.search` string
    pub fn from_query(search: &str) -> Self {
        let debug = search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| {
                let rest = pair.strip_prefix(DEBUG_PARAM)?;
                if rest.is_empty() {
                    return Some(true);
                }
                let value = rest.strip_prefix('=')?;
                Some(value == "1" || value.eq_ignore_ascii_case("true"))
            })
            .last();

        Self {
            debug: debug.unwrap_or(false),
            ..Self::default()
        }
    }
}
