//! Core note collection logic for the digital garden.
//! This crate is the single source of truth for note metadata invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod source;

pub use config::{ConfigError, GardenConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::note::{parse_note_date, Note, NoteMetadata};
pub use model::status::{status_glyph, status_glyph_for, status_legend, Status, UnknownStatusError};
pub use model::tag::{locale_compare, slugify, Tag};
pub use repo::listing::{
    distinct_tags_sorted_by_name, find_by_slug, list_sorted_by_recency, notes_tagged, tag_counts,
};
pub use repo::note_repo::{
    validate_record, validate_records, LoadError, LoadResult, NoteRepository, ValidationError,
    ValidationErrorKind,
};
pub use service::note_service::{NoteService, NotesIndex, TopicPage};
pub use source::{
    ContentSource, MarkdownDirSource, MemorySource, RawNoteRecord, RawTag, SourceError,
    SourceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
