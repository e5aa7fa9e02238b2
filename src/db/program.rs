// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! External program records and their human-readable labels

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{fmt, path::Path};

/// One record of the external program database.
///
/// Only the fields the converter consumes are modeled; the upstream database
/// carries plenty more (descriptions, URLs, image paths) which serde skips.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgramRecord {
    /// Raw filename of the program's ROM, also mined for author metadata
    pub file: String,
    pub title: Option<String>,
    /// Ordered author list
    pub authors: Option<Vec<String>>,
    pub release: Option<Release>,
    /// External platform vocabulary; absent means legacy chip-8
    pub platform: Option<String>,
    /// Quirk flags and cosmetic settings, in file order
    pub options: Option<Map<String, Value>>,
    /// Content hash, filled in by the identification pass
    pub sha1: Option<String>,
}

/// Release year, stored upstream sometimes as a string and sometimes as a
/// bare number
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Release {
    Text(String),
    Year(i64),
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Release::Text(text) => f.write_str(text),
            Release::Year(year) => write!(f, "{year}"),
        }
    }
}

// Filename metadata patterns, in priority order. Downstream consumers depend
// on this order, so a filename matching more than one pattern must use the
// first.
static BRACKET_WITH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^,]+)\s*,\s*(\d\w*)]").expect("pattern is valid"));
static BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^,]+)\s*]").expect("pattern is valid"));
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("pattern is valid"));

impl ProgramRecord {
    /// The display name: the explicit title if there is one, the file stem
    /// otherwise, capitalized per word with double quotes demoted to single
    pub fn name(&self) -> String {
        let raw = match &self.title {
            Some(title) => title.clone(),
            None => Path::new(&self.file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file.clone()),
        };
        title_case(&raw).replace('"', "'")
    }

    /// The parenthesized author/release suffix, leading space included, or an
    /// empty string.
    ///
    /// Explicit authors win; otherwise the filename is mined with the
    /// patterns above, first match wins. This is heuristic and can misfire on
    /// nested brackets, so nothing fancier is attempted.
    pub fn metadata(&self) -> String {
        if let Some(authors) = self.authors.as_deref().filter(|authors| !authors.is_empty()) {
            let authors = authors.join(", ");
            return match &self.release {
                Some(release) => format!(" ({authors}, {release})"),
                None => format!(" ({authors})"),
            };
        }
        if let Some(found) = BRACKET_WITH_YEAR.captures(&self.file) {
            format!(" ({}, {})", &found[1], &found[2])
        } else if let Some(found) = BRACKET.captures(&self.file) {
            format!(" ({})", &found[1])
        } else if let Some(found) = PARENTHESIZED.captures(&self.file) {
            format!(" ({})", &found[1])
        } else {
            String::new()
        }
    }
}

/// Capitalizes the first letter of every word, lowercases the rest. Any
/// non-letter starts a new word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_file(file: &str) -> ProgramRecord {
        ProgramRecord {
            file: file.to_string(),
            ..Default::default()
        }
    }

    mod name {
        use super::*;

        #[test]
        fn title_is_capitalized_per_word() {
            let rec = ProgramRecord {
                title: Some("space INVADERS from space".to_string()),
                ..Default::default()
            };
            assert_eq!(rec.name(), "Space Invaders From Space");
        }

        #[test]
        fn non_letters_start_new_words() {
            let rec = ProgramRecord {
                title: Some("they're 3d-ready".to_string()),
                ..Default::default()
            };
            assert_eq!(rec.name(), "They'Re 3D-Ready");
        }

        #[test]
        fn double_quotes_become_single() {
            let rec = ProgramRecord {
                title: Some(r#"the "best" game"#.to_string()),
                ..Default::default()
            };
            assert_eq!(rec.name(), "The 'Best' Game");
        }

        #[test]
        fn missing_title_falls_back_to_file_stem() {
            let mut rec = with_file("roms/lunar lander.ch8");
            assert_eq!(rec.name(), "Lunar Lander");
            rec.title = Some("Lunar Lander DX".to_string());
            assert_eq!(rec.name(), "Lunar Lander Dx");
        }
    }

    mod metadata {
        use super::*;

        #[test]
        fn explicit_authors_with_release() {
            let rec = ProgramRecord {
                authors: Some(vec!["A. Uthor".to_string(), "B. Uthor".to_string()]),
                release: Some(Release::Text("1991".to_string())),
                ..with_file("whatever [X, 1990].ch8")
            };
            assert_eq!(rec.metadata(), " (A. Uthor, B. Uthor, 1991)");
        }

        #[test]
        fn explicit_authors_without_release() {
            let rec = ProgramRecord {
                authors: Some(vec!["A. Uthor".to_string()]),
                ..Default::default()
            };
            assert_eq!(rec.metadata(), " (A. Uthor)");
        }

        #[test]
        fn numeric_release_is_accepted() {
            let rec: ProgramRecord = serde_json::from_str(
                r#"{"file": "x.ch8", "authors": ["A"], "release": 1978}"#,
            )
            .unwrap();
            assert_eq!(rec.metadata(), " (A, 1978)");
        }

        #[test]
        fn empty_author_list_falls_through_to_filename() {
            let rec = ProgramRecord {
                authors: Some(vec![]),
                ..with_file("Brix [Andreas Gustafsson, 1990].ch8")
            };
            assert_eq!(rec.metadata(), " (Andreas Gustafsson, 1990)");
        }

        #[test]
        fn bracket_with_year_has_priority() {
            let rec = with_file("Tank (demo) [Unknown, 199x].ch8");
            assert_eq!(rec.metadata(), " (Unknown, 199x)");
        }

        #[test]
        fn bracket_without_comma_is_second() {
            let rec = with_file("Maze (alt) [David Winter].ch8");
            assert_eq!(rec.metadata(), " (David Winter)");
        }

        #[test]
        fn parenthesized_is_last_resort() {
            let rec = with_file("Pong (1 player).ch8");
            assert_eq!(rec.metadata(), " (1 player)");
        }

        #[test]
        fn no_pattern_means_empty() {
            let rec = with_file("roms/15puzzle.ch8");
            assert_eq!(rec.metadata(), "");
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let rec: ProgramRecord = serde_json::from_str(
            r#"{"file": "x.ch8", "title": "x", "description": "?", "images": ["x.png"]}"#,
        )
        .unwrap();
        assert_eq!(rec.file, "x.ch8");
    }
}
