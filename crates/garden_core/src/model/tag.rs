//! Topic tag model.
//!
//! # Responsibility
//! - Define the `Tag` value embedded in note metadata.
//! - Provide slug derivation and display-name ordering helpers.
//!
//! # Invariants
//! - `slug` is the identity key; `name` is display-only.
//! - Both fields are non-empty for a validated tag.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NON_SLUG_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid slug regex"));

/// Topic label attached to notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Routing and de-duplication key.
    pub slug: String,
    /// Display name.
    pub name: String,
}

impl Tag {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }

    /// Builds a tag from a display name, deriving its slug.
    ///
    /// Returns `None` when the name has no slug-able characters.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let slug = slugify(name);
        if slug.is_empty() {
            return None;
        }
        Some(Self::new(slug, name))
    }
}

/// Lowercases and joins alphanumeric runs with `-`.
///
/// `"Type Script!"` -> `"type-script"`.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    NON_SLUG_CHARS_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Compares display names the way the notes index orders topics.
///
/// Letters are compared without accents or case first, so `"Éclair"` sorts
/// with the `e`s. Remaining ties put unaccented before accented text, then
/// lowercase before uppercase, then fall back to code point order.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| folded(left).cmp(folded(right)))
        .then_with(|| case_order(left, right))
        .then_with(|| left.cmp(right))
}

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

fn folded(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().flat_map(char::to_lowercase)
}

fn case_order(left: &str, right: &str) -> Ordering {
    for (l, r) in left.nfd().zip(right.nfd()) {
        match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) if r.is_uppercase() => return Ordering::Less,
            (false, true) if l.is_uppercase() => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::{locale_compare, slugify, Tag};
    use std::cmp::Ordering;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Digital   Garden! "), "digital-garden");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }

    #[test]
    fn from_name_rejects_symbol_only_names() {
        assert!(Tag::from_name("!!!").is_none());
        assert_eq!(
            Tag::from_name(" TypeScript "),
            Some(Tag::new("typescript", "TypeScript"))
        );
    }

    #[test]
    fn locale_compare_ignores_case_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "alpha"), Ordering::Greater);
        assert_eq!(locale_compare("react", "React"), Ordering::Less);
        assert_eq!(locale_compare("React", "React"), Ordering::Equal);
    }

    #[test]
    fn locale_compare_sorts_accented_letters_with_their_base() {
        assert_eq!(locale_compare("Éclair", "Vue"), Ordering::Less);
        assert_eq!(locale_compare("Über", "Zebra"), Ordering::Less);
        assert_eq!(locale_compare("über", "Ulm"), Ordering::Less);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("Café", "cafe"), Ordering::Greater);
    }

    #[test]
    fn locale_compare_treats_composed_and_decomposed_forms_alike() {
        for name in ["caf\u{e9}", "cafe\u{301}"] {
            assert_eq!(locale_compare(name, "cafe"), Ordering::Greater);
            assert_eq!(locale_compare(name, "cafes"), Ordering::Less);
            assert_eq!(locale_compare(name, "Cafés"), Ordering::Less);
        }
    }
}
