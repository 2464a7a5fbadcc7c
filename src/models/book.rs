//! Book model and validation rules

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// ISBN-13 as used here: three digits, a hyphen, ten digits. The real
/// check-digit algorithm is deliberately not applied.
static ISBN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{10}$").unwrap());

/// A book record. The ISBN is the unique key and never changes once the
/// record exists; updates re-stamp it from the request path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique key, `NNN-NNNNNNNNNN`
    #[validate(regex(path = *ISBN_PATTERN, message = "Value was not valid ISBN-13"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "'Title' must not be empty."))]
    pub title: String,
    pub author: String,
    pub short_description: String,
    pub page_count: i32,
    /// Publication date (YYYY-MM-DD)
    pub release_date: NaiveDate,
}

/// A single field-level validation failure as exposed on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

// Violations are reported in field declaration order so the output is
// deterministic regardless of how the rule failures are collected.
const FIELD_ORDER: &[&str] = &[
    "isbn",
    "title",
    "author",
    "short_description",
    "page_count",
    "release_date",
];

impl Book {
    /// Check the record against the field rules. An empty result means the
    /// record is valid. Pure: no I/O, no side effects.
    pub fn violations(&self) -> Vec<ValidationFailure> {
        let errors = match Validate::validate(self) {
            Ok(()) => return Vec::new(),
            Err(errors) => errors,
        };

        let by_field = errors.field_errors();
        let mut failures = Vec::new();
        for field in FIELD_ORDER {
            if let Some(list) = by_field.get(field) {
                for error in list.iter() {
                    failures.push(ValidationFailure {
                        property_name: wire_name(field).to_string(),
                        error_message: error
                            .message
                            .as_ref()
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| error.code.to_string()),
                    });
                }
            }
        }

        failures
    }
}

/// Maps a Rust field name to its JSON (camelCase) name
fn wire_name(field: &str) -> &str {
    match field {
        "short_description" => "shortDescription",
        "page_count" => "pageCount",
        "release_date" => "releaseDate",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            isbn: "977-4234567001".to_string(),
            title: "The Dirty Coder".to_string(),
            author: "David Mendoza".to_string(),
            short_description: "All my tricks in one book".to_string(),
            page_count: 420,
            release_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        }
    }

    #[test]
    fn valid_book_has_no_violations() {
        assert!(sample_book().violations().is_empty());
    }

    #[test]
    fn malformed_isbn_reports_a_single_isbn_violation() {
        let bad_isbns = [
            "invalid-isbn",
            "12-3456789012",
            "1234-123456789",
            "977 4234567001",
            "9774234567001",
            "977-42345670012",
            "",
        ];

        for isbn in bad_isbns {
            let mut book = sample_book();
            book.isbn = isbn.to_string();

            let violations = book.violations();
            assert_eq!(1, violations.len(), "isbn {:?}", isbn);
            assert_eq!("isbn", violations[0].property_name);
            assert_eq!("Value was not valid ISBN-13", violations[0].error_message);
        }
    }

    #[test]
    fn empty_title_reports_a_title_violation() {
        let mut book = sample_book();
        book.title = String::new();

        let violations = book.violations();
        assert_eq!(1, violations.len());
        assert_eq!("title", violations[0].property_name);
        assert_eq!("'Title' must not be empty.", violations[0].error_message);
    }

    #[test]
    fn whitespace_only_title_is_accepted() {
        let mut book = sample_book();
        book.title = "   ".to_string();
        assert!(book.violations().is_empty());
    }

    #[test]
    fn violations_follow_field_declaration_order() {
        let mut book = sample_book();
        book.isbn = "bad".to_string();
        book.title = String::new();

        let violations = book.violations();
        assert_eq!(2, violations.len());
        assert_eq!("isbn", violations[0].property_name);
        assert_eq!("title", violations[1].property_name);
    }

    #[test]
    fn no_other_field_is_constrained() {
        let mut book = sample_book();
        book.author = String::new();
        book.short_description = String::new();
        book.page_count = -1;
        assert!(book.violations().is_empty());
    }

    #[test]
    fn serializes_camel_case_field_names() {
        let value = serde_json::to_value(sample_book()).unwrap();
        assert_eq!("977-4234567001", value["isbn"]);
        assert_eq!("The Dirty Coder", value["title"]);
        assert_eq!("All my tricks in one book", value["shortDescription"]);
        assert_eq!(420, value["pageCount"]);
        assert_eq!("2026-10-01", value["releaseDate"]);
    }
}
