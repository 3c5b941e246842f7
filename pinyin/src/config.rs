//! Pinyin-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `namedex_core::Config` (flattened via serde)
//! - The output format used when displaying readings
//! - An optional reading table (compiled or text) to load instead of the bundled one
//! - Whether names are assumed to start with a family name
//!
//! # Example
//!
//! ```rust
//! use namedex_pinyin::PinyinIndexConfig;
//!
//! let config = PinyinIndexConfig::from_toml_str("surname_hints = true").unwrap();
//! assert!(config.surname_hints);
//! assert!(config.base().polyphone_variants);
//! ```
use std::path::{Path, PathBuf};

use namedex_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinyinIndexConfig {
    /// Base configuration fields (polyphone variants, match strategies, sections)
    #[serde(flatten)]
    pub base: namedex_core::Config,

    /// Format for readings shown to users (search spellings always use
    /// `OutputFormat::SEARCH`)
    pub output_format: OutputFormat,

    /// Table to load instead of the bundled one: a compiled `.bin` table
    /// from `convert_pinyin_table` or a text resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<PathBuf>,

    /// Apply surname readings to the first character of every name
    pub surname_hints: bool,
}

impl PinyinIndexConfig {
    /// Convert this pinyin config into the base config
    pub fn into_base(self) -> namedex_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &namedex_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut namedex_core::Config {
        &mut self.base
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read config {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
