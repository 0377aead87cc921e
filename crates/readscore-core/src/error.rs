//! Error types for readscore-core.
//!
//! Scoring itself never fails; these cover the edges where the library
//! touches the filesystem.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when loading a replacement word list.
#[derive(Error, Debug)]
pub enum WordListError {
    /// The word list file could not be read.
    #[error("failed to read word list {path}: {source}")]
    Read {
        /// Path of the word list.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The word list file contained no words.
    #[error("word list {path} contains no words")]
    Empty {
        /// Path of the word list.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`WordListError`].
pub type WordListResult<T> = Result<T, WordListError>;
