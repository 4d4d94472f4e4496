//! Error types for infotoc operations.

use std::io;
use std::num::NonZeroU16;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a [`NodeReader`](crate::NodeReader) while opening a
/// topic or streaming its node records.
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("no info document found for topic `{0}`")]
    TopicNotFound(String),

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed node header: {0}")]
    Malformed(String),

    #[error("no topic is open")]
    NotOpen,

    /// Escape hatch for readers backed by something other than Info files.
    #[error("reader error {code}: {message}")]
    Other { code: NonZeroU16, message: String },
}

impl ReaderError {
    /// Numeric status of this error, always in `1..=u16::MAX`.
    pub fn code(&self) -> u32 {
        match self {
            ReaderError::TopicNotFound(_) => 1,
            ReaderError::Io { .. } => 2,
            ReaderError::Malformed(_) => 3,
            ReaderError::NotOpen => 4,
            ReaderError::Other { code, .. } => u32::from(code.get()),
        }
    }
}

/// Terminal failure of a hierarchy build.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The reader failed mid-stream; no assembly was attempted.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// The records could not be assembled into a single ordered tree.
    #[error("no hierarchy could be built")]
    NoHierarchy,
}

impl BuildError {
    /// Status code reported for [`BuildError::NoHierarchy`]. It lies above
    /// every reader code.
    pub const NO_HIERARCHY: u32 = 1 << 16;

    /// Numeric status of this failure. `0` is never returned; it is reserved
    /// for a successful build.
    pub fn code(&self) -> u32 {
        match self {
            BuildError::Reader(err) => err.code(),
            BuildError::NoHierarchy => Self::NO_HIERARCHY,
        }
    }

    pub fn is_no_hierarchy(&self) -> bool {
        matches!(self, BuildError::NoHierarchy)
    }
}

/// Errors that can occur in the high-level helpers.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl From<ReaderError> for Error {
    fn from(err: ReaderError) -> Self {
        Error::Build(BuildError::Reader(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_codes_are_distinct_from_no_hierarchy() {
        let errors = [
            ReaderError::TopicNotFound("x".into()),
            ReaderError::Io {
                path: PathBuf::from("x.info"),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            },
            ReaderError::Malformed("File: x".into()),
            ReaderError::NotOpen,
        ];
        for err in errors {
            assert_ne!(err.code(), 0);
            assert_ne!(err.code(), BuildError::NO_HIERARCHY);
        }
    }

    #[test]
    fn test_build_error_passes_reader_code_through() {
        let err = BuildError::from(ReaderError::Other {
            code: NonZeroU16::new(42).unwrap(),
            message: "disk on fire".into(),
        });
        assert_eq!(err.code(), 42);
        assert!(!err.is_no_hierarchy());
        assert_eq!(err.to_string(), "reader error 42: disk on fire");
    }

    #[test]
    fn test_reader_codes_never_collide_with_build_statuses() {
        for raw in [1, 100, u16::MAX] {
            let err = BuildError::from(ReaderError::Other {
                code: NonZeroU16::new(raw).unwrap(),
                message: "custom".into(),
            });
            assert_ne!(err.code(), 0);
            assert_ne!(err.code(), BuildError::NO_HIERARCHY);
            assert!(err.code() < BuildError::NO_HIERARCHY);
        }
    }

    #[test]
    fn test_no_hierarchy_code() {
        assert_eq!(BuildError::NoHierarchy.code(), BuildError::NO_HIERARCHY);
        assert!(BuildError::NoHierarchy.is_no_hierarchy());
    }
}
