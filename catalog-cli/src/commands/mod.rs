//! Command implementations for the catalog CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod check;
pub mod completions;
pub mod list;
pub mod menu;
pub mod show;

use std::path::Path;

use anyhow::Context;
use catalog_core::{ingest, CourseIndex, FileSource, IngestOptions, IngestReport};

use crate::output::{paint, OutputConfig, Paint};

/// Ingest a course file into a fresh index.
pub fn load_catalog(
    path: &Path,
    options: &IngestOptions,
) -> anyhow::Result<(CourseIndex, IngestReport)> {
    let mut index = CourseIndex::new();
    let report = ingest(&FileSource::new(path), &mut index, options)
        .with_context(|| format!("Failed to load course file {}", path.display()))?;
    Ok((index, report))
}

/// Print every diagnostic of `report` to stderr.
pub fn warn_diagnostics(report: &IngestReport, config: &OutputConfig) {
    for diagnostic in &report.diagnostics {
        eprintln!(
            "{} {}. Skipping.",
            paint("WARNING:", config, Paint::Warning),
            diagnostic
        );
    }
}
