//! Token usage extraction and cumulative recording.
//!
//! Clients report usage under different names (`input_tokens` vs the older
//! `prompt_tokens`), so [`TokenUsage`] accepts both. [`record`] keeps a running
//! total in a small YAML file.

use std::fs;
use std::ops::{Add, AddAssign};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token counts for one or more model calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default, alias = "prompt_tokens")]
    pub input_tokens: u64,
    #[serde(default, alias = "completion_tokens")]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }

    /// Reads usage out of response metadata.
    ///
    /// Looks for a `token_usage` object first, then `usage`, and finally
    /// treats `metadata` itself as the usage object. Missing counts are zero;
    /// a missing total is the sum of input and output.
    pub fn from_metadata(metadata: &Value) -> Self {
        let usage = metadata
            .get("token_usage")
            .or_else(|| metadata.get("usage"))
            .unwrap_or(metadata);

        let count = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| usage.get(*name).and_then(Value::as_u64))
        };

        let input = count(&["input_tokens", "prompt_tokens"]).unwrap_or(0);
        let output = count(&["output_tokens", "completion_tokens"]).unwrap_or(0);
        let total = count(&["total_tokens"]).unwrap_or(input.saturating_add(output));
        Self::new(input, output, total)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, other: TokenUsage) -> TokenUsage {
        TokenUsage {
            input_tokens: self.input_tokens.saturating_add(other.input_tokens),
            output_tokens: self.output_tokens.saturating_add(other.output_tokens),
            total_tokens: self.total_tokens.saturating_add(other.total_tokens),
        }
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: TokenUsage) {
        *self = *self + other;
    }
}

impl std::fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input: {} | output: {} | total: {}",
            self.input_tokens, self.output_tokens, self.total_tokens
        )
    }
}

/// Adds `usage` to the running total stored at `record`.
///
/// Without a path the usage is returned unchanged. With one, the existing
/// total is read (zero if the file does not exist yet), the new usage is
/// added, and the sum is written back, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the record exists but cannot be read or parsed, or if
/// the updated total cannot be written.
pub fn record(usage: TokenUsage, record: Option<&Path>) -> Result<TokenUsage> {
    let Some(path) = record else {
        return Ok(usage);
    };

    let mut total = if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read usage record {:?}", path))?;
        if contents.trim().is_empty() {
            TokenUsage::default()
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse usage record {:?}", path))?
        }
    } else {
        TokenUsage::default()
    };
    total += usage;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }
    let yaml = serde_yaml::to_string(&total).context("Failed to serialize usage record")?;
    fs::write(path, yaml).with_context(|| format!("Failed to write usage record {:?}", path))?;

    tracing::debug!(path = %path.display(), %total, "recorded token usage");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("llmloader-usage-{}-{name}", std::process::id()))
            .join("usage.yaml")
    }

    #[test]
    fn test_record_accumulates() {
        let path = scratch_path("accumulate");
        let _ = fs::remove_file(&path);

        let first = record(TokenUsage::new(10, 20, 30), Some(&path)).unwrap();
        assert_eq!(first, TokenUsage::new(10, 20, 30));

        let second = record(TokenUsage::new(15, 25, 40), Some(&path)).unwrap();
        assert_eq!(second, TokenUsage::new(25, 45, 70));

        let on_disk: TokenUsage =
            serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, TokenUsage::new(25, 45, 70));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_record_saturates_at_max() {
        let path = scratch_path("saturate");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            format!("input_tokens: {0}\noutput_tokens: 0\ntotal_tokens: {0}\n", u64::MAX),
        )
        .unwrap();

        let total = record(TokenUsage::new(1, 2, 3), Some(&path)).unwrap();
        assert_eq!(total, TokenUsage::new(u64::MAX, 2, u64::MAX));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_from_metadata_total_saturates() {
        let metadata = json!({"usage": {"input_tokens": u64::MAX, "output_tokens": 5}});
        assert_eq!(
            TokenUsage::from_metadata(&metadata),
            TokenUsage::new(u64::MAX, 5, u64::MAX)
        );
    }

    #[test]
    fn test_record_without_path_returns_usage() {
        let usage = TokenUsage::new(1, 2, 3);
        assert_eq!(record(usage, None).unwrap(), usage);
    }

    #[test]
    fn test_from_metadata_reads_token_usage() {
        let metadata = json!({
            "token_usage": {"input_tokens": 7, "output_tokens": 3, "total_tokens": 10}
        });
        assert_eq!(TokenUsage::from_metadata(&metadata), TokenUsage::new(7, 3, 10));
    }

    #[test]
    fn test_from_metadata_legacy_names() {
        let metadata = json!({"usage": {"prompt_tokens": 4, "completion_tokens": 6}});
        assert_eq!(TokenUsage::from_metadata(&metadata), TokenUsage::new(4, 6, 10));
    }

    #[test]
    fn test_from_metadata_missing_is_zero() {
        let usage = TokenUsage::from_metadata(&json!({"model": "dummy"}));
        assert!(usage.is_empty());
    }

    #[test]
    fn test_deserialize_legacy_aliases() {
        let usage: TokenUsage =
            serde_json::from_value(json!({"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}))
                .unwrap();
        assert_eq!(usage, TokenUsage::new(5, 2, 7));
    }
}
