//! Content source contracts and adapters.
//!
//! # Responsibility
//! - Define the raw, unvalidated record shape handed to the repository.
//! - Provide read adapters for markdown directories and in-process record
//!   sets.
//!
//! # Invariants
//! - Sources never validate metadata; that is the repository's job.
//! - `read_records` either returns every record or fails as a whole.
//! - `revision` changes whenever the returned records could change.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod frontmatter;
pub mod markdown_dir;
pub mod memory;

pub use markdown_dir::MarkdownDirSource;
pub use memory::MemorySource;

pub type SourceResult<T> = Result<T, SourceError>;

/// Unvalidated note record as read from a content source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNoteRecord {
    /// Record identity (file stem, index row slug, ...). Kept verbatim.
    pub slug: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub tags: Vec<RawTag>,
}

impl RawNoteRecord {
    /// Creates an empty record for `slug`; every metadata field is missing.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    pub fn published_at(mut self, value: impl Into<String>) -> Self {
        self.published_at = Some(value.into());
        self
    }

    pub fn updated_at(mut self, value: impl Into<String>) -> Self {
        self.updated_at = Some(value.into());
        self
    }

    pub fn tag(mut self, tag: RawTag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Unvalidated tag reference. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTag {
    pub slug: Option<String>,
    pub name: Option<String>,
}

impl RawTag {
    /// Tag written with an explicit slug and display name.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            name: Some(name.into()),
        }
    }

    /// Tag written as a bare display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            slug: None,
            name: Some(name.into()),
        }
    }
}

/// Read-only provider of raw note records.
pub trait ContentSource {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Returns every record currently held by the source.
    fn read_records(&self) -> SourceResult<Vec<RawNoteRecord>>;

    /// Returns a fingerprint of the current content, or `None` when the
    /// source cannot detect changes.
    fn revision(&self) -> SourceResult<Option<u64>> {
        Ok(None)
    }
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_records(&self) -> SourceResult<Vec<RawNoteRecord>> {
        (**self).read_records()
    }

    fn revision(&self) -> SourceResult<Option<u64>> {
        (**self).revision()
    }
}

/// Failure to read records from a content source.
#[derive(Debug)]
pub enum SourceError {
    /// Filesystem failure on `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Front matter block is not a valid YAML mapping.
    FrontMatter { path: PathBuf, message: String },
    /// Note file name is not valid UTF-8, so no slug can be derived.
    InvalidFileName { path: PathBuf },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::FrontMatter { path, message } => {
                write!(f, "invalid front matter in `{}`: {message}", path.display())
            }
            Self::InvalidFileName { path } => {
                write!(f, "note file name `{}` is not valid UTF-8", path.display())
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::FrontMatter { .. } | Self::InvalidFileName { .. } => None,
        }
    }
}
