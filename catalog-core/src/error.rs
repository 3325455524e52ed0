//! Error types for catalog-core.
//!
//! Only whole-run failures are errors. Problems with individual lines of a
//! course file are reported as [`crate::ingest::Diagnostic`] values instead.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or querying a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The line source could not be opened or read.
    #[error("Course source unavailable: {source_name}")]
    Unavailable {
        /// Human-readable name of the source (usually a file path).
        source_name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A session already holds a successfully loaded catalog.
    #[error("Course file has already been loaded from {source_name}")]
    AlreadyLoaded {
        /// Source of the load that succeeded earlier.
        source_name: String,
    },

    /// A query was made before any catalog was loaded.
    #[error("No course file has been loaded")]
    NotLoaded,
}

impl CatalogError {
    pub(crate) fn unavailable(source_name: impl Into<String>, source: std::io::Error) -> Self {
        CatalogError::Unavailable {
            source_name: source_name.into(),
            source,
        }
    }
}
