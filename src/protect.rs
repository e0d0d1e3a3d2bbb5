use crate::config::ProtectionConfig;
use anyhow::{Context, Result};
use regex::Regex;

/// Decides which columns an Update operation must never overwrite.
#[derive(Debug)]
pub struct ColumnGuard {
    substrings: Vec<String>,
    model_code: Regex,
}

impl ColumnGuard {
    pub fn from_config(config: &ProtectionConfig) -> Result<Self> {
        let model_code = Regex::new(&config.model_code_pattern).with_context(|| {
            format!(
                "invalid model code pattern '{}'",
                config.model_code_pattern
            )
        })?;
        Ok(Self {
            substrings: config.substrings.clone(),
            model_code,
        })
    }

    pub fn is_protected(&self, header: &str) -> bool {
        self.substrings.iter().any(|s| header.contains(s.as_str()))
            || self.model_code.is_match(header)
    }
}
