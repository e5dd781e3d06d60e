//! Note repository: load and validate the whole note collection.
//!
//! # Responsibility
//! - Pull raw records from a `ContentSource`.
//! - Normalize each record into a validated `Note`.
//! - Reject the entire load on the first invalid or colliding record.
//!
//! # Invariants
//! - A successful load returns exactly one `Note` per raw record, with the
//!   record slug preserved verbatim.
//! - Slugs are unique across the returned collection.
//! - No partial result is ever returned.

use crate::model::note::{parse_note_date, Note, NoteMetadata};
use crate::model::status::{Status, UnknownStatusError};
use crate::model::tag::{slugify, Tag};
use crate::source::{ContentSource, RawNoteRecord, RawTag, SourceError};
use chrono::{DateTime, Utc};
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type LoadResult<T> = Result<T, LoadError>;

/// Field-level validation failure for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Slug of the offending record.
    pub slug: String,
    pub kind: ValidationErrorKind,
}

/// What exactly is wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field absent or blank.
    MissingField(&'static str),
    /// Date field present but not in an accepted format.
    MalformedDate { field: &'static str, value: String },
    /// Status text outside the known enumeration.
    UnknownStatus(UnknownStatusError),
    /// Tag at `index` has neither a usable slug nor a usable name.
    InvalidTag { index: usize },
    /// Slug already used by an earlier record.
    DuplicateSlug,
}

impl ValidationError {
    fn new(slug: &str, kind: ValidationErrorKind) -> Self {
        Self {
            slug: slug.to_string(),
            kind,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let slug = &self.slug;
        match &self.kind {
            ValidationErrorKind::MissingField(field) => {
                write!(f, "note `{slug}`: missing required field `{field}`")
            }
            ValidationErrorKind::MalformedDate { field, value } => {
                write!(f, "note `{slug}`: malformed date `{value}` in `{field}`")
            }
            ValidationErrorKind::UnknownStatus(err) => write!(f, "note `{slug}`: {err}"),
            ValidationErrorKind::InvalidTag { index } => {
                write!(f, "note `{slug}`: tag #{index} has no slug or name")
            }
            ValidationErrorKind::DuplicateSlug => {
                write!(f, "note `{slug}`: slug is used by more than one record")
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ValidationErrorKind::UnknownStatus(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure of a whole-collection load.
#[derive(Debug)]
pub enum LoadError {
    /// Content source could not be read.
    Source(SourceError),
    /// A record failed validation.
    Validation(ValidationError),
}

impl LoadError {
    /// Returns the validation failure, if that is what stopped the load.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Source(_) => None,
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<ValidationError> for LoadError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Read-only repository over one content source.
pub struct NoteRepository<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> NoteRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads and validates every note in the source.
    ///
    /// # Errors
    /// - `LoadError::Source` when the source cannot be read.
    /// - `LoadError::Validation` for the first invalid record, including
    ///   `DuplicateSlug` for a slug already seen.
    ///
    /// # Side effects
    /// - Emits `notes_load` events with record count and duration.
    pub fn load_all(&self) -> LoadResult<Vec<Note>> {
        let started_at = Instant::now();
        let source_name = self.source.name();

        let result = self
            .source
            .read_records()
            .map_err(LoadError::from)
            .and_then(|records| validate_records(records).map_err(LoadError::from));

        match &result {
            Ok(notes) => info!(
                "event=notes_load module=repo status=ok source={} count={} duration_ms={}",
                source_name,
                notes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(LoadError::Validation(err)) => error!(
                "event=notes_load module=repo status=error source={} error_code=validation slug={} duration_ms={}",
                source_name,
                err.slug,
                started_at.elapsed().as_millis()
            ),
            Err(LoadError::Source(err)) => error!(
                "event=notes_load module=repo status=error source={} error_code=source duration_ms={} error={}",
                source_name,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Validates a full record set, rejecting duplicate slugs.
pub fn validate_records(records: Vec<RawNoteRecord>) -> Result<Vec<Note>, ValidationError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut notes = Vec::with_capacity(records.len());
    for record in records {
        let note = validate_record(record)?;
        if !seen.insert(note.slug.clone()) {
            return Err(ValidationError::new(
                &note.slug,
                ValidationErrorKind::DuplicateSlug,
            ));
        }
        notes.push(note);
    }
    Ok(notes)
}

/// Normalizes one raw record into a `Note`.
///
/// Text fields are trimmed; tags written as bare names get a slug derived
/// from the name, and tags without a name display their slug.
pub fn validate_record(record: RawNoteRecord) -> Result<Note, ValidationError> {
    let slug = record.slug;
    if slug.trim().is_empty() {
        return Err(ValidationError::new(
            &slug,
            ValidationErrorKind::MissingField("slug"),
        ));
    }

    let title = required_text(&slug, "title", record.title)?;
    let status = required_text(&slug, "status", record.status)?
        .parse::<Status>()
        .map_err(|err| ValidationError::new(&slug, ValidationErrorKind::UnknownStatus(err)))?;
    let published_at = required_date(&slug, "publishedAt", record.published_at)?;
    let updated_at = match non_blank(record.updated_at) {
        Some(value) => Some(parse_date(&slug, "updatedAt", value)?),
        None => None,
    };
    let tags = record
        .tags
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            normalize_tag(raw)
                .ok_or_else(|| ValidationError::new(&slug, ValidationErrorKind::InvalidTag { index }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Note {
        slug,
        metadata: NoteMetadata {
            title,
            status,
            published_at,
            updated_at,
            tags,
        },
    })
}

fn normalize_tag(raw: RawTag) -> Option<Tag> {
    let slug = non_blank(raw.slug);
    let name = non_blank(raw.name);
    match (slug, name) {
        (Some(slug), Some(name)) => Some(Tag::new(slug, name)),
        (Some(slug), None) => Some(Tag::new(slug.clone(), slug)),
        (None, Some(name)) => {
            let derived = slugify(&name);
            (!derived.is_empty()).then(|| Tag::new(derived, name))
        }
        (None, None) => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn required_text(
    slug: &str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    non_blank(value)
        .ok_or_else(|| ValidationError::new(slug, ValidationErrorKind::MissingField(field)))
}

fn required_date(
    slug: &str,
    field: &'static str,
    value: Option<String>,
) -> Result<DateTime<Utc>, ValidationError> {
    let text = required_text(slug, field, value)?;
    parse_date(slug, field, text)
}

fn parse_date(
    slug: &str,
    field: &'static str,
    value: String,
) -> Result<DateTime<Utc>, ValidationError> {
    parse_note_date(&value).ok_or_else(|| {
        ValidationError::new(slug, ValidationErrorKind::MalformedDate { field, value })
    })
}
