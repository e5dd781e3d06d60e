//! YAML front matter extraction for markdown note files.
//!
//! # Responsibility
//! - Split the leading `---` fenced block from a note file.
//! - Read known metadata keys into a `RawNoteRecord` without validating them.
//!
//! # Invariants
//! - Scalars of any YAML type are read as text; type checks happen later.
//! - A file without a front matter block yields a record with every field
//!   missing, so validation reports the gap instead of the parser.

use crate::source::{RawNoteRecord, RawTag};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

static FRONT_MATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?sm)\A\s*---[ \t]*\r?\n(.*?)^---[ \t]*\r?$").expect("valid front matter regex")
});

const TITLE_KEYS: &[&str] = &["title"];
const STATUS_KEYS: &[&str] = &["status"];
const PUBLISHED_AT_KEYS: &[&str] = &["publishedAt", "published_at"];
const UPDATED_AT_KEYS: &[&str] = &["updatedAt", "updated_at"];
const TAGS_KEYS: &[&str] = &["tags"];

/// Returns the YAML text between the opening and closing `---` fences.
pub fn split_front_matter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    FRONT_MATTER_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|block| block.as_str())
}

/// Parses a note file into a raw record for `slug`.
///
/// # Errors
/// - Returns a message when the block is not YAML, is not a mapping, or a
///   known key holds an unsupported shape.
pub fn parse_record(slug: &str, content: &str) -> Result<RawNoteRecord, String> {
    let mut record = RawNoteRecord::new(slug);
    let Some(yaml) = split_front_matter(content) else {
        return Ok(record);
    };

    let fields: Value = serde_yaml::from_str(yaml).map_err(|err| err.to_string())?;
    if fields.is_null() {
        return Ok(record);
    }
    if !fields.is_mapping() {
        return Err("front matter must be a key/value mapping".to_string());
    }

    record.title = scalar_field(&fields, TITLE_KEYS)?;
    record.status = scalar_field(&fields, STATUS_KEYS)?;
    record.published_at = scalar_field(&fields, PUBLISHED_AT_KEYS)?;
    record.updated_at = scalar_field(&fields, UPDATED_AT_KEYS)?;
    record.tags = tags_field(&fields)?;
    Ok(record)
}

fn lookup<'a>(fields: &'a Value, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| fields.get(*key).map(|value| (*key, value)))
}

fn scalar_field(fields: &Value, keys: &[&'static str]) -> Result<Option<String>, String> {
    match lookup(fields, keys) {
        None => Ok(None),
        Some((key, value)) => {
            scalar_text(value).map_err(|()| format!("`{key}` must be a scalar value"))
        }
    }
}

fn scalar_text(value: &Value) -> Result<Option<String>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        _ => Err(()),
    }
}

fn tags_field(fields: &Value) -> Result<Vec<RawTag>, String> {
    let items = match lookup(fields, TAGS_KEYS) {
        None | Some((_, Value::Null)) => return Ok(Vec::new()),
        Some((_, Value::Sequence(items))) => items,
        Some(_) => return Err("`tags` must be a list".to_string()),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<RawTag, String> {
            if item.is_mapping() {
                let part = |key: &str| {
                    scalar_text(item.get(key).unwrap_or(&Value::Null))
                        .map_err(|()| format!("`tags[{index}].{key}` must be a scalar value"))
                };
                return Ok(RawTag {
                    slug: part("slug")?,
                    name: part("name")?,
                });
            }
            let name = scalar_text(item)
                .map_err(|()| format!("`tags[{index}]` must be a name or a slug/name map"))?;
            Ok(RawTag { slug: None, name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_record, split_front_matter};
    use crate::source::RawTag;

    #[test]
    fn split_returns_none_without_opening_fence() {
        assert_eq!(split_front_matter("# Heading\n\nBody"), None);
        assert_eq!(split_front_matter("---\ntitle: unterminated\n"), None);
    }

    #[test]
    fn split_accepts_empty_block_and_bom() {
        assert_eq!(split_front_matter("---\n---\nbody"), Some(""));
        assert_eq!(
            split_front_matter("\u{feff}---\ntitle: x\n---\n"),
            Some("title: x\n")
        );
    }

    #[test]
    fn parse_reads_known_keys_and_mixed_tags() {
        let content = "---\n\
title: Digital garden\n\
status: evergreen\n\
publishedAt: 2024-01-01\n\
updated_at: 2024-02-01\n\
tags:\n  - Rust\n  - { slug: ts, name: TypeScript }\n\
---\n\nBody text";
        let record = parse_record("digital-garden", content).unwrap();
        assert_eq!(record.slug, "digital-garden");
        assert_eq!(record.title.as_deref(), Some("Digital garden"));
        assert_eq!(record.status.as_deref(), Some("evergreen"));
        assert_eq!(record.published_at.as_deref(), Some("2024-01-01"));
        assert_eq!(record.updated_at.as_deref(), Some("2024-02-01"));
        assert_eq!(
            record.tags,
            vec![RawTag::named("Rust"), RawTag::new("ts", "TypeScript")]
        );
    }

    #[test]
    fn parse_without_front_matter_leaves_fields_missing() {
        let record = parse_record("plain", "Just text").unwrap();
        assert_eq!(record.title, None);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn parse_rejects_non_mapping_and_bad_shapes() {
        assert!(parse_record("x", "---\n- a\n- b\n---\n").is_err());
        let err = parse_record("x", "---\ntitle: [a, b]\n---\n").unwrap_err();
        assert!(err.contains("title"));
        let err = parse_record("x", "---\ntags: rust\n---\n").unwrap_err();
        assert!(err.contains("tags"));
    }
}
