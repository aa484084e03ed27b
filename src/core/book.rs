//! # Book Records
//!
//! `BookRecord` is the one value that flows through every screen:
//! search results produce it, details renders it, favorites persists it.
//!
//! Records are passed around by value and never edited in place. Missing
//! optional fields stay `None` all the way to the rendering boundary, where
//! the `display_*` helpers substitute placeholders.

use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_DESCRIPTION: &str = "No description available.";

/// One catalog entry, keyed by a stable `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Treats `Some("")` and whitespace-only strings as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl BookRecord {
    /// A record with only an id. Handy for tests and for building up records field by field.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            authors: None,
            published_date: None,
            description: None,
            thumbnail_url: None,
        }
    }

    pub fn display_title(&self) -> &str {
        present(&self.title).unwrap_or(UNTITLED)
    }

    /// Authors joined with ", ", or `None` if there are none worth showing.
    pub fn authors_line(&self) -> Option<String> {
        let authors: Vec<&str> = self
            .authors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();
        if authors.is_empty() {
            None
        } else {
            Some(authors.join(", "))
        }
    }

    pub fn display_authors(&self) -> String {
        self.authors_line()
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    }

    pub fn display_description(&self) -> &str {
        present(&self.description).unwrap_or(NO_DESCRIPTION)
    }

    pub fn published(&self) -> Option<&str> {
        present(&self.published_date)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        present(&self.thumbnail_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> BookRecord {
        BookRecord {
            id: "nggnmAEACAAJ".to_string(),
            title: Some("Dune".to_string()),
            authors: Some(vec!["Frank Herbert".to_string()]),
            published_date: Some("1965".to_string()),
            description: Some("Desert planet.".to_string()),
            thumbnail_url: Some("http://books.google.com/thumb.jpg".to_string()),
        }
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&full_record()).unwrap();
        assert!(json.contains(r#""publishedDate":"1965""#));
        assert!(json.contains(r#""thumbnailUrl":"#));
        assert!(!json.contains("published_date"));
    }

    #[test]
    fn test_absent_fields_are_omitted_and_default_on_read() {
        let json = serde_json::to_string(&BookRecord::new("abc")).unwrap();
        assert_eq!(json, r#"{"id":"abc"}"#);

        let parsed: BookRecord = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(parsed, BookRecord::new("abc"));
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let record = BookRecord::new("x");
        assert_eq!(record.display_title(), UNTITLED);
        assert_eq!(record.display_authors(), UNKNOWN_AUTHOR);
        assert_eq!(record.display_description(), NO_DESCRIPTION);
        assert!(record.published().is_none());
        assert!(record.thumbnail().is_none());
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let record = BookRecord {
            title: Some("   ".to_string()),
            authors: Some(vec!["".to_string(), " ".to_string()]),
            description: Some(String::new()),
            ..BookRecord::new("x")
        };
        assert_eq!(record.display_title(), UNTITLED);
        assert!(record.authors_line().is_none());
        assert_eq!(record.display_description(), NO_DESCRIPTION);
    }

    #[test]
    fn test_authors_joined_in_order() {
        let record = BookRecord {
            authors: Some(vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()]),
            ..BookRecord::new("x")
        };
        assert_eq!(record.display_authors(), "Terry Pratchett, Neil Gaiman");
    }

    #[test]
    fn test_display_helpers_do_not_touch_the_record() {
        let record = BookRecord::new("x");
        let before = record.clone();
        let _ = record.display_title();
        let _ = record.display_authors();
        assert_eq!(record, before);
    }
}
