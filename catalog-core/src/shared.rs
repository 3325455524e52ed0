//! Thread-shareable catalog handle.
//!
//! Loading takes the write lock for the whole ingestion run; lookups and
//! listings take the read lock and may run concurrently with each other.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::index::CourseIndex;
use crate::ingest::{ingest, IngestOptions, IngestReport, LineSource};
use crate::types::Course;

/// Cloneable handle to one [`CourseIndex`] behind a reader-writer lock.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    index: Arc<RwLock<CourseIndex>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_index(index: CourseIndex) -> Self {
        Self {
            index: Arc::new(RwLock::new(index)),
        }
    }

    /// Ingest `source` while holding exclusive access to the index.
    pub fn load<S>(&self, source: &S, options: &IngestOptions) -> Result<IngestReport>
    where
        S: LineSource + ?Sized,
    {
        let mut index = self.write();
        ingest(source, &mut index, options)
    }

    pub fn lookup(&self, course_number: &str) -> Option<Course> {
        self.read().lookup(course_number).cloned()
    }

    /// Snapshot of every course in ascending order.
    pub fn list(&self) -> Vec<Course> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are never mutated after insertion, so a guard recovered from a
    // poisoned lock still sees a well-formed tree.
    fn read(&self) -> RwLockReadGuard<'_, CourseIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CourseIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::MemorySource;

    #[test]
    fn test_clones_share_one_index() {
        let catalog = SharedCatalog::new();
        let handle = catalog.clone();
        assert!(handle.is_empty());

        catalog
            .load(
                &MemorySource::from_lines(["CS100,Intro", "CS200,Data,CS100"]),
                &IngestOptions::default(),
            )
            .unwrap();

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.lookup("CS200").unwrap().course_name, "Data");
        assert!(handle.lookup("cs200").is_none());
    }

    #[test]
    fn test_list_is_ascending_snapshot() {
        let index: CourseIndex = [
            Course::new("CS300", "C", Vec::new()),
            Course::new("CS100", "A", Vec::new()),
        ]
        .into_iter()
        .collect();
        let catalog = SharedCatalog::from_index(index);

        let numbers: Vec<_> = catalog
            .list()
            .into_iter()
            .map(|c| c.course_number)
            .collect();
        assert_eq!(numbers, vec!["CS100", "CS300"]);
    }
}
