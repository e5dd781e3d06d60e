//! Note use-case service with an explicit collection cache.
//!
//! # Responsibility
//! - Serve index, note and topic views to the rendering layer.
//! - Keep one loaded collection for the process and reload it when the
//!   content source revision changes.
//!
//! # Invariants
//! - A cached snapshot is reused only while the source reports the same
//!   `Some(revision)`; sources without revisions reload on every call.
//! - A failed load never replaces or clears a cached snapshot.
//! - Callers receive shared immutable snapshots (`Arc<[Note]>`).

use crate::model::note::Note;
use crate::model::tag::Tag;
use crate::repo::listing::{
    distinct_tags_sorted_by_name, find_by_slug, list_sorted_by_recency, notes_tagged,
};
use crate::repo::note_repo::{LoadResult, NoteRepository};
use crate::source::ContentSource;
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Data consumed by the notes index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesIndex {
    /// Notes ordered most recent first.
    pub notes: Vec<Note>,
    /// Distinct topics ordered by display name.
    pub tags: Vec<Tag>,
}

/// Data consumed by one topic page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPage {
    /// First-seen representative of the topic.
    pub tag: Tag,
    /// Notes carrying the topic, most recent first.
    pub notes: Vec<Note>,
}

#[derive(Debug)]
struct CachedNotes {
    revision: u64,
    notes: Arc<[Note]>,
}

/// Note service facade over a repository.
pub struct NoteService<S: ContentSource> {
    repo: NoteRepository<S>,
    cache: Mutex<Option<CachedNotes>>,
}

impl<S: ContentSource> NoteService<S> {
    pub fn new(source: S) -> Self {
        Self {
            repo: NoteRepository::new(source),
            cache: Mutex::new(None),
        }
    }

    pub fn repository(&self) -> &NoteRepository<S> {
        &self.repo
    }

    /// Returns the current collection, reloading when the source changed.
    ///
    /// # Errors
    /// - Propagates source and validation failures of the reload.
    pub fn notes(&self) -> LoadResult<Arc<[Note]>> {
        let revision = match self.repo.source().revision() {
            Ok(revision) => revision,
            Err(err) => {
                warn!(
                    "event=notes_cache module=service status=degraded reason=revision_unavailable error={}",
                    err
                );
                None
            }
        };

        if let Some(current) = revision {
            if let Some(cached) = self.lock_cache().as_ref() {
                if cached.revision == current {
                    debug!("event=notes_cache module=service status=hit revision={current}");
                    return Ok(Arc::clone(&cached.notes));
                }
            }
        }

        debug!(
            "event=notes_cache module=service status=miss revision={}",
            revision.map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        let notes: Arc<[Note]> = self.repo.load_all()?.into();
        if let Some(revision) = revision {
            *self.lock_cache() = Some(CachedNotes {
                revision,
                notes: Arc::clone(&notes),
            });
        }
        Ok(notes)
    }

    /// Drops the cached collection; the next call reloads.
    pub fn invalidate(&self) {
        *self.lock_cache() = None;
        debug!("event=notes_cache module=service status=invalidated");
    }

    /// Returns whether a collection is currently cached.
    pub fn is_cached(&self) -> bool {
        self.lock_cache().is_some()
    }

    /// Builds the notes index view.
    pub fn index(&self) -> LoadResult<NotesIndex> {
        let notes = self.notes()?;
        Ok(NotesIndex {
            notes: list_sorted_by_recency(&notes),
            tags: distinct_tags_sorted_by_name(&notes),
        })
    }

    /// Looks up one note by slug.
    pub fn note(&self, slug: &str) -> LoadResult<Option<Note>> {
        let notes = self.notes()?;
        Ok(find_by_slug(&notes, slug).cloned())
    }

    /// Builds the topic view for `tag_slug`, or `None` for an unused tag.
    pub fn topic(&self, tag_slug: &str) -> LoadResult<Option<TopicPage>> {
        let notes = self.notes()?;
        let tag = notes
            .iter()
            .flat_map(|note| note.metadata.tags.iter())
            .find(|tag| tag.slug == tag_slug)
            .cloned();
        Ok(tag.map(|tag| TopicPage {
            notes: notes_tagged(&notes, &tag.slug),
            tag,
        }))
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedNotes>> {
        // A poisoned cache holds at worst a complete older snapshot.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
