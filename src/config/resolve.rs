//! Environment variable substitution in config values.

use super::types::Config;
use crate::env::Environment;

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self, env: &dyn Environment) {
        self.model = Self::resolve_str(&self.model, env);
        for entry in self.provider.entries_mut().into_iter().flatten() {
            if let Some(ref mut key) = entry.api_key {
                *key = Self::resolve_str(key, env);
            }
            if let Some(ref mut url) = entry.base_url {
                *url = Self::resolve_str(url, env);
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    /// Unset variables become empty strings. Substituted values are not
    /// expanded again.
    fn resolve_str(s: &str, env: &dyn Environment) -> String {
        let mut result = s.to_string();
        let mut cursor = 0;
        while let Some(offset) = result[cursor..].find("{env:") {
            let start = cursor + offset;
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = env.var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
                cursor = start + value.len();
            } else {
                break;
            }
        }
        result
    }
}
