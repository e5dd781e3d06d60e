//! In-process content source.
//!
//! Holds records handed over by the caller (generated content, tests). Each
//! `replace` bumps the revision so cached snapshots are invalidated.

use crate::source::{ContentSource, RawNoteRecord, SourceResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct MemorySource {
    records: Mutex<Vec<RawNoteRecord>>,
    revision: AtomicU64,
}

impl MemorySource {
    pub fn new(records: Vec<RawNoteRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            revision: AtomicU64::new(0),
        }
    }

    /// Swaps the full record set.
    pub fn replace(&self, records: Vec<RawNoteRecord>) {
        let mut guard = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = records;
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn read_records(&self) -> SourceResult<Vec<RawNoteRecord>> {
        let guard = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn revision(&self) -> SourceResult<Option<u64>> {
        Ok(Some(self.revision.load(Ordering::SeqCst)))
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySource;
    use crate::source::{ContentSource, RawNoteRecord};

    #[test]
    fn replace_swaps_records_and_bumps_revision() {
        let source = MemorySource::new(vec![RawNoteRecord::new("a")]);
        let before = source.revision().unwrap();

        source.replace(vec![RawNoteRecord::new("b"), RawNoteRecord::new("c")]);

        assert_ne!(source.revision().unwrap(), before);
        let slugs: Vec<String> = source
            .read_records()
            .unwrap()
            .into_iter()
            .map(|record| record.slug)
            .collect();
        assert_eq!(slugs, vec!["b".to_string(), "c".to_string()]);
    }
}
