use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::typechecker::IntegerType;

/// Element type given to `[]`, which has no first element to learn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyArrayPolicy {
    /// `[]unknown`, compatible with every array type.
    #[default]
    Unknown,
    /// `[]void`
    Void,
    /// Report `EmptyArrayLiteral` and continue with `[]unknown`.
    Reject,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("integer literal width must be 8, 16, 32 or 64, found {0}")]
    IntegerWidth(u8),
    #[error("float literal width must be 32 or 64, found {0}")]
    FloatWidth(u8),
    #[error("max_diagnostics must be at least 1")]
    ZeroDiagnosticLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    pub integer_literal: IntegerType,
    pub float_literal_bits: u8,
    pub empty_array: EmptyArrayPolicy,
    pub max_diagnostics: Option<usize>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            integer_literal: IntegerType::new(32, true),
            float_literal_bits: 64,
            empty_array: EmptyArrayPolicy::Unknown,
            max_diagnostics: None,
        }
    }
}

impl AnalyzerOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !IntegerType::is_supported_width(self.integer_literal.bits) {
            return Err(OptionsError::IntegerWidth(self.integer_literal.bits));
        }
        if !matches!(self.float_literal_bits, 32 | 64) {
            return Err(OptionsError::FloatWidth(self.float_literal_bits));
        }
        if self.max_diagnostics == Some(0) {
            return Err(OptionsError::ZeroDiagnosticLimit);
        }
        Ok(())
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(source).context("failed to parse analyzer options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("invalid analyzer options in {}", path.display()))
    }
}
