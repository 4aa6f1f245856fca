//! Core data models for the book catalog
//!
//! This module contains the canonical book shapes used throughout the
//! application, plus the HTTP client, record normalizer, and API key ring
//! that produce them from the external catalog.

pub mod client;
pub mod keys;
pub mod normalize;

pub use client::{CatalogClient, CatalogError, SortOrder};
pub use keys::ApiKeyRing;

use serde::{Deserialize, Serialize};

/// Delivery format of a catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Ebook,
    Paperback,
}

/// Condition label attached to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    New,
    LikeNew,
    VeryGood,
    Good,
}

impl Condition {
    /// Human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::VeryGood => "Very Good",
            Condition::Good => "Good",
        }
    }
}

/// A normalized catalog record
///
/// Invariant: a `Book` is only ever built with a non-empty cover URL; records
/// with no usable cover image are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identifier for the volume
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Primary author
    pub author: String,
    /// Description or synopsis, empty when the catalog supplies none
    pub description: String,
    /// Cover image URL, upgraded to https with watermark stripped
    pub cover_url: String,
    /// Average rating on a 0-5 scale
    pub rating: f64,
    /// Number of reviews behind the rating
    pub review_count: u32,
    /// Subject categories
    pub categories: Vec<String>,
    /// Publication date as reported by the catalog (year or full date)
    pub published_date: Option<String>,
    /// Whether this listing is a used copy
    pub is_used: bool,
    /// Condition label for the listing
    pub condition: Condition,
    /// Ebook or paperback
    pub format: Format,
    /// Direct download link, when the catalog offers one
    pub download_link: Option<String>,
    /// Link to an online preview or reader
    pub preview_link: Option<String>,
    /// Link to purchase the book
    pub purchase_link: Option<String>,
}

/// Full detail view of a single book
///
/// Superset of [`Book`] with the fields only shown on a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    /// Subtitle, when present
    pub subtitle: Option<String>,
    /// Complete author list
    pub authors: Vec<String>,
    /// Preferred ISBN (ISBN-13 when available, otherwise ISBN-10)
    pub isbn: Option<String>,
    /// Language code (e.g. "en")
    pub language: Option<String>,
    /// Page count
    pub page_count: Option<u32>,
    /// Publisher name
    pub publisher: Option<String>,
}

/// A page of search results with the API-reported total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Normalized books, already filtered and truncated
    pub books: Vec<Book>,
    /// Total matches reported by the catalog, not the page length
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: "abc123".to_string(),
            title: "A Test of Pages".to_string(),
            author: "Ada Writer".to_string(),
            description: "A book about books.".to_string(),
            cover_url: "https://books.google.com/books/content?id=abc123&zoom=2".to_string(),
            rating: 4.2,
            review_count: 311,
            categories: vec!["Fiction".to_string()],
            published_date: Some("2021-03-09".to_string()),
            is_used: false,
            condition: Condition::New,
            format: Format::Paperback,
            download_link: None,
            preview_link: Some("https://books.google.com/books?id=abc123".to_string()),
            purchase_link: None,
        }
    }

    #[test]
    fn test_condition_labels() {
        assert_eq!(Condition::New.label(), "New");
        assert_eq!(Condition::LikeNew.label(), "Like New");
        assert_eq!(Condition::VeryGood.label(), "Very Good");
        assert_eq!(Condition::Good.label(), "Good");
    }

    #[test]
    fn test_book_serialization_roundtrip() {
        let book = sample_book();

        let json = serde_json::to_string(&book).expect("Failed to serialize Book");
        let deserialized: Book = serde_json::from_str(&json).expect("Failed to deserialize Book");

        assert_eq!(deserialized, book);
    }

    #[test]
    fn test_book_details_flattens_book_fields() {
        let details = BookDetails {
            book: sample_book(),
            subtitle: Some("An Inquiry".to_string()),
            authors: vec!["Ada Writer".to_string(), "Ben Coauthor".to_string()],
            isbn: Some("9780000000001".to_string()),
            language: Some("en".to_string()),
            page_count: Some(288),
            publisher: Some("Example House".to_string()),
        };

        let json = serde_json::to_value(&details).expect("Failed to serialize BookDetails");

        // Flattened: Book fields sit at the top level next to the detail fields
        assert_eq!(json["id"], "abc123");
        assert_eq!(json["subtitle"], "An Inquiry");

        let roundtrip: BookDetails =
            serde_json::from_value(json).expect("Failed to deserialize BookDetails");
        assert_eq!(roundtrip, details);
    }

    #[test]
    fn test_search_results_roundtrip() {
        let results = SearchResults {
            books: vec![sample_book()],
            total: 1287,
        };

        let json = serde_json::to_string(&results).expect("Failed to serialize SearchResults");
        let deserialized: SearchResults =
            serde_json::from_str(&json).expect("Failed to deserialize SearchResults");

        assert_eq!(deserialized, results);
        assert_eq!(deserialized.total, 1287);
    }
}
