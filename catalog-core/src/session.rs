//! Catalog session state.
//!
//! A session owns one [`CourseIndex`] and remembers whether it has been
//! loaded. Loading succeeds at most once; queries before a successful load
//! fail with [`CatalogError::NotLoaded`].

use crate::error::{CatalogError, Result};
use crate::index::{CourseIndex, Iter};
use crate::ingest::{ingest, IngestOptions, IngestReport, LineSource};
use crate::types::Course;

#[derive(Debug, Default)]
pub struct CatalogSession {
    index: CourseIndex,
    report: Option<IngestReport>,
}

impl CatalogSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest `source` into this session's index.
    ///
    /// An unavailable source leaves the session unloaded, so the caller may
    /// retry with another source.
    pub fn load<S>(&mut self, source: &S, options: &IngestOptions) -> Result<&IngestReport>
    where
        S: LineSource + ?Sized,
    {
        if let Some(report) = &self.report {
            return Err(CatalogError::AlreadyLoaded {
                source_name: report.source.clone(),
            });
        }

        let report = ingest(source, &mut self.index, options)?;
        Ok(self.report.insert(report))
    }

    pub fn is_loaded(&self) -> bool {
        self.report.is_some()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.report.as_ref().map(|r| r.source.as_str())
    }

    pub fn last_report(&self) -> Option<&IngestReport> {
        self.report.as_ref()
    }

    /// All courses in ascending order; `Ok(None)` when the loaded file had none.
    pub fn courses(&self) -> Result<Option<Iter<'_>>> {
        self.ensure_loaded()?;
        Ok(self.index.ascending())
    }

    pub fn find(&self, course_number: &str) -> Result<Option<&Course>> {
        self.ensure_loaded()?;
        Ok(self.index.lookup(course_number))
    }

    pub fn index(&self) -> &CourseIndex {
        &self.index
    }

    pub fn into_index(self) -> CourseIndex {
        self.index
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(CatalogError::NotLoaded)
        }
    }
}
