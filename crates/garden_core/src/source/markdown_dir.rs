//! Markdown directory content source.
//!
//! # Responsibility
//! - Enumerate note files (`*.md`, `*.mdx`) in one directory.
//! - Derive each record's slug from its file stem and metadata from its
//!   front matter.
//!
//! # Invariants
//! - Only top-level files are read; hidden entries are skipped.
//! - Records are returned in file-name order.
//! - `revision` covers name, size and modification time of every note file.

use crate::source::frontmatter::parse_record;
use crate::source::{ContentSource, RawNoteRecord, SourceError, SourceResult};
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

const NOTE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Reads notes from markdown files with YAML front matter.
#[derive(Debug, Clone)]
pub struct MarkdownDirSource {
    dir: PathBuf,
}

impl MarkdownDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists note files sorted by file name.
    pub fn note_files(&self) -> SourceResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| io_error(&self.dir, source))?.path();
            if is_note_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl ContentSource for MarkdownDirSource {
    fn name(&self) -> &str {
        "markdown_dir"
    }

    fn read_records(&self) -> SourceResult<Vec<RawNoteRecord>> {
        let files = self.note_files()?;
        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            let slug = file_slug(&path)?;
            let record = parse_record(&slug, &content).map_err(|message| {
                SourceError::FrontMatter {
                    path: path.clone(),
                    message,
                }
            })?;
            records.push(record);
        }
        debug!(
            "event=source_read module=source status=ok source=markdown_dir records={}",
            records.len()
        );
        Ok(records)
    }

    fn revision(&self) -> SourceResult<Option<u64>> {
        let mut hasher = DefaultHasher::new();
        for path in self.note_files()? {
            let meta = fs::metadata(&path).map_err(|source| io_error(&path, source))?;
            let modified = meta
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|elapsed| elapsed.as_nanos());
            path.file_name().hash(&mut hasher);
            meta.len().hash(&mut hasher);
            modified.hash(&mut hasher);
        }
        Ok(Some(hasher.finish()))
    }
}

fn is_note_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    let has_note_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| NOTE_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    !hidden && has_note_extension && path.is_file()
}

fn file_slug(path: &Path) -> SourceResult<String> {
    match path.file_stem() {
        None => Ok(String::new()),
        Some(stem) => stem
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| SourceError::InvalidFileName {
                path: path.to_path_buf(),
            }),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{file_slug, MarkdownDirSource};
    use crate::source::{ContentSource, SourceError};
    use std::fs;
    use std::path::Path;

    #[test]
    fn slug_is_file_stem() {
        assert_eq!(
            file_slug(Path::new("/notes/digital-garden.mdx")).unwrap(),
            "digital-garden"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_name_is_reported_instead_of_lossy_slug() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad-\u{fffd}.md"), "---\ntitle: A\n---\n").unwrap();
        let raw = dir.path().join(OsStr::from_bytes(b"bad-\xff.md"));
        fs::write(&raw, "---\ntitle: B\n---\n").unwrap();

        let err = MarkdownDirSource::new(dir.path()).read_records().unwrap_err();
        match err {
            SourceError::InvalidFileName { path } => assert_eq!(path, raw),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skips_hidden_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "---\ntitle: B\n---\n").unwrap();
        fs::write(dir.path().join("a.mdx"), "---\ntitle: A\n---\n").unwrap();
        fs::write(dir.path().join(".draft.md"), "---\ntitle: D\n---\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "nope").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let source = MarkdownDirSource::new(dir.path());
        let slugs: Vec<String> = source
            .read_records()
            .unwrap()
            .into_iter()
            .map(|record| record.slug)
            .collect();
        assert_eq!(slugs, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn revision_changes_when_a_file_is_added() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "---\ntitle: A\n---\n").unwrap();
        let source = MarkdownDirSource::new(dir.path());
        let before = source.revision().unwrap();
        assert_eq!(before, source.revision().unwrap());

        fs::write(dir.path().join("b.md"), "---\ntitle: B\n---\n").unwrap();
        assert_ne!(before, source.revision().unwrap());
    }
}
