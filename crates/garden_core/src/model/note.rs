//! Note domain model.
//!
//! # Responsibility
//! - Define the validated `Note` record consumed by listing and rendering.
//! - Parse the date formats accepted in note metadata.
//!
//! # Invariants
//! - `slug` is taken verbatim from the content source and never rewritten.
//! - `updated_at`, when set, supersedes `published_at` for recency ordering.

use crate::model::status::Status;
use crate::model::tag::Tag;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One validated content item of the garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub slug: String,
    pub metadata: NoteMetadata,
}

/// Validated front-matter metadata for a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    /// Non-empty, trimmed title.
    pub title: String,
    pub status: Status,
    pub published_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Tags in source order.
    pub tags: Vec<Tag>,
}

impl Note {
    /// Returns the date used for recency ordering.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.metadata
            .updated_at
            .unwrap_or(self.metadata.published_at)
    }

    /// Returns whether this note carries a tag with the given slug.
    pub fn has_tag(&self, tag_slug: &str) -> bool {
        self.metadata.tags.iter().any(|tag| tag.slug == tag_slug)
    }

    /// Shortcut for `self.metadata.status.glyph()`.
    pub fn glyph(&self) -> &'static str {
        self.metadata.status.glyph()
    }
}

/// Parses a metadata date.
///
/// Accepts RFC 3339, naive date-time (treated as UTC) and plain
/// `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else.
pub fn parse_note_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
