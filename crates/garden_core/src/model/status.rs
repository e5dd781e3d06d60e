//! Note maturity status.
//!
//! # Responsibility
//! - Define the closed set of garden maturity levels.
//! - Map each level to its display glyph and legend label.
//!
//! # Invariants
//! - Every `Status` has exactly one glyph; the mapping is an exhaustive match.
//! - Unknown status text is an error, never a silent default.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maturity classification of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Freshly planted idea, unpolished.
    Seedling,
    /// Idea under active development.
    Budding,
    /// Mature, settled note.
    Evergreen,
    /// Pointer to external content.
    Link,
}

impl Status {
    /// All statuses in legend order.
    pub const ALL: [Status; 4] = [
        Status::Seedling,
        Status::Budding,
        Status::Evergreen,
        Status::Link,
    ];

    /// Returns the glyph rendered next to a note of this status.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Seedling => "\u{1F331}",
            Self::Budding => "\u{1F33F}",
            Self::Evergreen => "\u{1F332}",
            Self::Link => "\u{1F517}",
        }
    }

    /// Returns the human-readable legend label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Seedling => "Seedling",
            Self::Budding => "Budding",
            Self::Evergreen => "Evergreen",
            Self::Link => "Link",
        }
    }

    /// Returns the canonical source key (`seedling|budding|evergreen|link`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Budding => "budding",
            Self::Evergreen => "evergreen",
            Self::Link => "link",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "seedling" => Ok(Self::Seedling),
            "budding" => Ok(Self::Budding),
            "evergreen" => Ok(Self::Evergreen),
            "link" => Ok(Self::Link),
            _ => Err(UnknownStatusError {
                value: value.to_string(),
            }),
        }
    }
}

/// Raised when status text is outside the known enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusError {
    /// Offending raw value, verbatim.
    pub value: String,
}

impl Display for UnknownStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown note status `{}`; expected seedling|budding|evergreen|link",
            self.value
        )
    }
}

impl Error for UnknownStatusError {}

/// Returns the glyph for a typed status. Total over the enumeration.
pub fn status_glyph(status: Status) -> &'static str {
    status.glyph()
}

/// Returns the glyph for raw status text.
///
/// # Errors
/// - Returns `UnknownStatusError` for any value outside the enumeration.
pub fn status_glyph_for(value: &str) -> Result<&'static str, UnknownStatusError> {
    value.parse::<Status>().map(Status::glyph)
}

/// Renders the legend line shown above the notes index.
pub fn status_legend() -> String {
    Status::ALL
        .iter()
        .map(|status| format!("{} = {}", status.glyph(), status.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{status_glyph_for, status_legend, Status};

    #[test]
    fn parse_is_trimmed_and_case_insensitive() {
        assert_eq!(" Evergreen ".parse::<Status>(), Ok(Status::Evergreen));
        assert_eq!("LINK".parse::<Status>(), Ok(Status::Link));
    }

    #[test]
    fn glyphs_are_distinct() {
        let mut glyphs = Status::ALL.map(Status::glyph).to_vec();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), Status::ALL.len());
    }

    #[test]
    fn unknown_text_keeps_raw_value() {
        let err = status_glyph_for("sapling").unwrap_err();
        assert_eq!(err.value, "sapling");
        assert!(err.to_string().contains("sapling"));
    }

    #[test]
    fn legend_lists_all_statuses_in_order() {
        assert_eq!(
            status_legend(),
            "\u{1F331} = Seedling, \u{1F33F} = Budding, \u{1F332} = Evergreen, \u{1F517} = Link"
        );
    }
}
