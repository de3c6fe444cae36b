//! Error types for `flag-matrix`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the workflow generation pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatrixError {
    /// A region marker was absent from the header text.
    #[error("marker '{marker}' not found in header")]
    MissingMarker {
        /// The marker string that could not be located.
        marker: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path of the offending configuration file.
        path: Utf8PathBuf,
        /// Underlying read or parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Figment failed to merge or extract the configuration layers.
    #[error("failed to gather configuration: {0}")]
    Gathering(#[from] Box<figment::Error>),

    /// Two distinct flags reduce to the same display name.
    #[error("flags '{first}' and '{second}' both display as '{display}'")]
    NameCollision {
        /// The shared display name.
        display: String,
        /// Identifier that claimed the display name first.
        first: String,
        /// Identifier that collided with it.
        second: String,
    },

    /// A flag identifier consists entirely of separator characters.
    #[error("flag '{ident}' has no display name once separators are stripped")]
    EmptyDisplayName {
        /// The offending identifier.
        ident: String,
    },

    /// The extracted flag set is too large to enumerate.
    #[error("{count} flags exceed the limit of {limit}; the workflow would be impractically large")]
    TooManyFlags {
        /// Number of flags extracted from the header.
        count: usize,
        /// Maximum number of flags the generator accepts.
        limit: usize,
    },

    /// I/O failure reading the header or writing the document.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path of the file or sink involved.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Residual invariant failures.
    #[error("{0}")]
    Message(String),
}
