//! namedex-core
//!
//! Language-agnostic pieces of a searchable name index, shared by the
//! transliteration crates (currently `namedex-pinyin`).
//!
//! Public API:
//! - `PositionIndex` - spelling character -> source character mapping
//! - `Matcher` / `Searchable` - query evaluation with highlight ranges
//! - `sections` - alphabetical grouping for an index bar
//! - `ReachabilityNotifier` - network status collaborator for app shells
//! - `Config` - configuration and feature flags
//! - `Error` - error taxonomy
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod positions;
pub use positions::PositionIndex;

pub mod matching;
pub use matching::{MatchKind, MatchResult, Matcher, Searchable, SpellingView};

pub mod sections;
pub use sections::{section_letter, section_titles, sections, Section};

pub mod reachability;
pub use reachability::{ReachabilityNotifier, ReachabilityProvider, ReachabilityStatus, Subscription};

/// Generic configuration for name indexing and search.
///
/// Language-specific options (reading resources, output formats, surname
/// handling) belong in the language crate's config, e.g. `PinyinIndexConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Build alternate spellings for names containing polyphone characters
    pub polyphone_variants: bool,

    // Match strategies, in priority order
    /// Literal match against the name
    pub match_exact: bool,
    /// Match against the full spelling, starting on a character boundary
    pub match_full_spelling: bool,
    /// Match against the initials
    pub match_initials: bool,
    /// Mixed full-syllable / initial-letter match
    pub match_mixed: bool,

    /// Title of the section holding names that do not start with a letter
    pub section_other_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polyphone_variants: true,
            match_exact: true,
            match_full_spelling: true,
            match_initials: true,
            match_mixed: true,
            section_other_label: "#".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read config {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .map_err(|e| Error::io(format!("write config {}", path.display()), e))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// True if at least one match strategy is enabled.
    pub fn any_match_enabled(&self) -> bool {
        self.match_exact || self.match_full_spelling || self.match_initials || self.match_mixed
    }
}
