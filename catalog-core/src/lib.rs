//! Catalog Core - ordered course index and course file ingestion.
//!
//! This crate holds everything a course catalog front end needs below the
//! presentation layer: the data model, the index, the file validator, and
//! the session bookkeeping that ties them together. It performs no console
//! I/O.
//!
//! # Features
//!
//! - **Ordered index**: unbalanced binary search tree keyed by course number,
//!   first insert wins, lazy ascending iteration
//! - **Two-pass ingestion**: prerequisites are validated against every
//!   course number declared anywhere in the file, case-insensitively
//! - **Diagnostics as data**: malformed lines and unknown prerequisites are
//!   reported per line instead of aborting the load
//! - **Sessions**: load-once semantics with explicit "not loaded" errors
//! - **Shared access**: a reader-writer handle for multi-threaded callers
//!
//! # Usage
//!
//! ```
//! use catalog_core::{CatalogSession, IngestOptions, MemorySource};
//!
//! let source = MemorySource::from_lines([
//!     "CS101, Intro to CS",
//!     "CS201, Data Structures, CS101",
//!     "CS301, Algorithms, CS999",
//! ]);
//!
//! let mut session = CatalogSession::new();
//! let report = session.load(&source, &IngestOptions::default())?;
//! assert_eq!(report.inserted, 2);
//! assert_eq!(report.diagnostics[0].to_string(), "Invalid prerequisite 'CS999' at line 3");
//!
//! let course = session.find("CS201")?.expect("CS201 was loaded");
//! assert_eq!(course.prerequisites, vec!["CS101"]);
//! # Ok::<(), catalog_core::CatalogError>(())
//! ```

pub mod error;
pub mod index;
pub mod ingest;
pub mod session;
pub mod shared;
pub mod types;

pub use error::{CatalogError, Result};
pub use index::{CourseIndex, Iter};
pub use ingest::{
    ingest, Diagnostic, DiagnosticKind, FileSource, IngestOptions, IngestReport, LineNumbering,
    LineSource, MemorySource,
};
pub use session::CatalogSession;
pub use shared::SharedCatalog;
pub use types::Course;
