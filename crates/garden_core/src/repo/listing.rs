//! Pure listing queries over loaded notes.
//!
//! # Responsibility
//! - Order notes for the index page and topic pages.
//! - Collapse tag occurrences into the topic list.
//!
//! # Invariants
//! - Inputs are borrowed and never reordered in place.
//! - Recency order is `effective_date DESC, slug ASC`.
//! - Tag collapse keeps the first-seen name per slug: notes in input order,
//!   then tags in note order. Later spellings are ignored.

use crate::model::note::Note;
use crate::model::tag::{locale_compare, Tag};
use std::collections::HashMap;

/// Returns a copy of `notes` ordered most recent first.
pub fn list_sorted_by_recency(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sort_by_recency(&mut sorted);
    sorted
}

/// Returns the distinct tags across `notes`, ordered by display name.
pub fn distinct_tags_sorted_by_name(notes: &[Note]) -> Vec<Tag> {
    tag_counts(notes).into_iter().map(|(tag, _)| tag).collect()
}

/// Returns the distinct tags with the number of notes carrying each one.
///
/// Same order and first-seen naming as `distinct_tags_sorted_by_name`. A
/// note repeating a tag slug is counted once.
pub fn tag_counts(notes: &[Note]) -> Vec<(Tag, usize)> {
    let mut index_by_slug: HashMap<&str, usize> = HashMap::new();
    let mut counted: Vec<(Tag, usize)> = Vec::new();

    for note in notes {
        let mut counted_for_note: Vec<usize> = Vec::new();
        for tag in &note.metadata.tags {
            let position = *index_by_slug.entry(tag.slug.as_str()).or_insert_with(|| {
                counted.push((tag.clone(), 0));
                counted.len() - 1
            });
            if !counted_for_note.contains(&position) {
                counted_for_note.push(position);
                counted[position].1 += 1;
            }
        }
    }

    counted.sort_by(|(left, _), (right, _)| {
        locale_compare(&left.name, &right.name).then_with(|| left.slug.cmp(&right.slug))
    });
    counted
}

/// Finds a note by exact slug.
pub fn find_by_slug<'a>(notes: &'a [Note], slug: &str) -> Option<&'a Note> {
    notes.iter().find(|note| note.slug == slug)
}

/// Returns the notes carrying `tag_slug`, most recent first.
pub fn notes_tagged(notes: &[Note], tag_slug: &str) -> Vec<Note> {
    let mut tagged: Vec<Note> = notes
        .iter()
        .filter(|note| note.has_tag(tag_slug))
        .cloned()
        .collect();
    sort_by_recency(&mut tagged);
    tagged
}

fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by(|left, right| {
        right
            .effective_date()
            .cmp(&left.effective_date())
            .then_with(|| left.slug.cmp(&right.slug))
    });
}
