//! Error taxonomy shared by the name index crates.
//!
//! Characters without a table entry are not an error: lookups return no
//! readings and the character passes through unchanged.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// The reading resource is missing, unreadable or malformed.
    #[error("failed to load pinyin resource ({context})")]
    ResourceLoad {
        context: String,
        #[source]
        source: Option<StdErrorBoxed>,
    },

    /// Position arrays disagree with the spelling they describe.
    #[error("internal consistency violation in {what}: expected {expected}, found {found}")]
    InternalConsistency {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A serialized position array could not be parsed.
    #[error("malformed location entry {entry:?}")]
    MalformedLocation {
        entry: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("the global pinyin table is already initialized")]
    AlreadyInitialized,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn resource(context: impl Into<String>) -> Error {
        Error::ResourceLoad {
            context: context.into(),
            source: None,
        }
    }

    pub fn resource_with<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::ResourceLoad {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn inconsistent(what: &'static str, expected: usize, found: usize) -> Error {
        Error::InternalConsistency {
            what,
            expected,
            found,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// True for errors that indicate a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InternalConsistency { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::resource_with("open table.txt", io);
        assert!(err.to_string().contains("open table.txt"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_internal());
    }

    #[test]
    fn consistency_error_is_internal() {
        let err = Error::inconsistent("full spelling positions", 9, 8);
        assert!(err.is_internal());
        assert!(err.to_string().contains("expected 9, found 8"));
    }
}
