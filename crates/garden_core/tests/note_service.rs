use garden_core::{
    MarkdownDirSource, MemorySource, NoteService, RawNoteRecord, RawTag, Tag,
};
use std::fs;

fn record(slug: &str, published: &str, tags: &[(&str, &str)]) -> RawNoteRecord {
    tags.iter().fold(
        RawNoteRecord::new(slug)
            .title(slug)
            .status("evergreen")
            .published_at(published),
        |record, (tag_slug, tag_name)| record.tag(RawTag::new(*tag_slug, *tag_name)),
    )
}

#[test]
fn index_combines_recency_order_and_topics() {
    let source = MemorySource::new(vec![
        record("older", "2023-01-01", &[("ts", "TypeScript")]),
        record("newer", "2024-01-01", &[("ts", "typescript"), ("css", "CSS")]),
    ]);
    let service = NoteService::new(&source);

    let index = service.index().unwrap();

    let slugs: Vec<&str> = index.notes.iter().map(|note| note.slug.as_str()).collect();
    assert_eq!(slugs, vec!["newer", "older"]);
    assert_eq!(
        index.tags,
        vec![Tag::new("css", "CSS"), Tag::new("ts", "TypeScript")]
    );
}

#[test]
fn cached_snapshot_is_reused_until_source_changes() {
    let source = MemorySource::new(vec![record("a", "2024-01-01", &[])]);
    let service = NoteService::new(&source);

    let first = service.notes().unwrap();
    let second = service.notes().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    source.replace(vec![
        record("a", "2024-01-01", &[]),
        record("b", "2024-02-01", &[]),
    ]);
    let third = service.notes().unwrap();
    assert_eq!(third.len(), 2);
    assert!(!std::sync::Arc::ptr_eq(&first, &third));
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let source = MemorySource::new(vec![record("a", "2024-01-01", &[])]);
    let service = NoteService::new(&source);
    service.notes().unwrap();

    source.replace(vec![record("a", "2024-01-01", &[]).status("wilted")]);
    assert!(service.notes().is_err());
    assert!(service.is_cached());
}

#[test]
fn note_and_topic_lookups() {
    let source = MemorySource::new(vec![
        record("first", "2023-01-01", &[("rust", "Rust")]),
        record("second", "2024-01-01", &[("rust", "rust"), ("wasm", "WASM")]),
    ]);
    let service = NoteService::new(&source);

    assert_eq!(service.note("second").unwrap().unwrap().slug, "second");
    assert!(service.note("missing").unwrap().is_none());

    let topic = service.topic("rust").unwrap().unwrap();
    assert_eq!(topic.tag, Tag::new("rust", "Rust"));
    let slugs: Vec<&str> = topic.notes.iter().map(|note| note.slug.as_str()).collect();
    assert_eq!(slugs, vec!["second", "first"]);
    assert!(service.topic("python").unwrap().is_none());
}

#[test]
fn directory_edits_invalidate_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let note = "---\ntitle: One\nstatus: seedling\npublishedAt: 2024-01-01\n---\n";
    fs::write(dir.path().join("one.md"), note).unwrap();
    let service = NoteService::new(MarkdownDirSource::new(dir.path()));
    assert_eq!(service.notes().unwrap().len(), 1);

    let another = "---\ntitle: Two\nstatus: budding\npublishedAt: 2024-02-01\n---\n";
    fs::write(dir.path().join("two.md"), another).unwrap();
    assert_eq!(service.notes().unwrap().len(), 2);
}
