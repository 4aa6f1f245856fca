//! Book discovery service
//!
//! Wraps the catalog client with an in-memory cache and static fallback data.
//! Every list operation follows the same shape: check the cache, fetch and
//! normalize on a miss, cache the result, and on failure log a warning and
//! return the bundled fallback dataset instead of propagating the error. Only
//! the single-book detail fetch can surface an error (a volume with no
//! derivable cover), which callers must handle themselves.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::warn;

use super::samples;
use crate::cache::MemoryCache;
use crate::catalog::client::{CatalogClient, CatalogError, Volume, VolumesResponse};
use crate::catalog::{normalize, Book, BookDetails, SearchResults, SortOrder};

/// Factor by which search over-fetches to compensate for cover filtering
const SEARCH_OVERFETCH_FACTOR: u32 = 2;

/// Page size for each subject query behind the top-rated section
const SUBJECT_PAGE_SIZE: u32 = 20;

/// Subjects aggregated into the top-rated section
const HIGHLY_RATED_SUBJECTS: [&str; 5] =
    ["fiction", "mystery", "science fiction", "biography", "history"];

/// Publication year the top-rated section is pinned to
const HIGHLY_RATED_YEAR: &str = "2024";

/// Maximum length of the top-rated list
const HIGHLY_RATED_LIMIT: usize = 10;

/// Curated "Title by Author" entries for the editor's picks section
const EDITORS_PICKS: [&str; 6] = [
    "The Midnight Library by Matt Haig",
    "Project Hail Mary by Andy Weir",
    "Klara and the Sun by Kazuo Ishiguro",
    "The Song of Achilles by Madeline Miller",
    "Educated by Tara Westover",
    "Tomorrow, and Tomorrow, and Tomorrow by Gabrielle Zevin",
];

const HIGHLY_RATED_CACHE_KEY: &str = "highly_rated";
const EDITORS_PICKS_CACHE_KEY: &str = "editors_picks";

/// Cache-backed facade over the book catalog
///
/// Both collaborators are injected, so tests can point the client at a dead
/// endpoint or pre-seed the cache.
pub struct BookService {
    client: CatalogClient,
    cache: MemoryCache,
}

impl BookService {
    /// Creates a service over the given client and cache
    pub fn new(client: CatalogClient, cache: MemoryCache) -> Self {
        Self { client, cache }
    }

    /// Creates a service against the live catalog with a fresh cache
    pub fn with_defaults() -> Self {
        Self::new(CatalogClient::new(), MemoryCache::new())
    }

    /// Searches the catalog
    ///
    /// Appends a `subject:` filter when a category is given and requests
    /// double the needed count, since records without covers are dropped
    /// after the fact. The returned list never exceeds `limit`; `total` is
    /// the match count reported by the catalog. Never fails: any error is
    /// logged and answered with the sample dataset.
    pub async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        sort: SortOrder,
        offset: u32,
        limit: u32,
    ) -> SearchResults {
        let key = search_cache_key(query, category, sort, offset, limit);
        if let Some(hit) = self.cache.get::<SearchResults>(&key) {
            return hit;
        }

        match self.search_uncached(query, category, sort, offset, limit).await {
            Ok(results) => {
                self.cache.set(&key, &results);
                results
            }
            Err(err) => {
                warn!(error = %err, query, "search failed, serving fallback data");
                fallback_search_results()
            }
        }
    }

    async fn search_uncached(
        &self,
        query: &str,
        category: Option<&str>,
        sort: SortOrder,
        offset: u32,
        limit: u32,
    ) -> Result<SearchResults, CatalogError> {
        let composed = compose_query(query, category);
        let response = self
            .client
            .search_volumes(&composed, sort, offset, limit * SEARCH_OVERFETCH_FACTOR)
            .await?;

        Ok(SearchResults {
            books: collect_books(&response.items, limit as usize),
            total: response.total_items,
        })
    }

    /// Top-rated books of the pinned year, aggregated across five subjects
    ///
    /// Subject queries run concurrently; a failed query is logged and skipped
    /// rather than sinking the whole batch, and the fallback dataset is only
    /// served when every query fails. The result has no duplicate ids, is
    /// sorted non-increasing by rating, and holds at most ten books.
    pub async fn highly_rated(&self) -> Vec<Book> {
        if let Some(hit) = self.cache.get::<Vec<Book>>(HIGHLY_RATED_CACHE_KEY) {
            return hit;
        }

        let requests: Vec<_> = HIGHLY_RATED_SUBJECTS
            .iter()
            .map(|subject| self.subject_page(subject))
            .collect();
        let outcomes = join_all(requests).await;

        let mut batches = Vec::new();
        let mut failures = 0;
        for (subject, outcome) in HIGHLY_RATED_SUBJECTS.iter().zip(outcomes) {
            match outcome {
                Ok(response) => {
                    let mut books = collect_books(&response.items, usize::MAX);
                    books.retain(published_in_pinned_year);
                    batches.push(books);
                }
                Err(err) => {
                    warn!(error = %err, subject, "top-rated subject query failed");
                    failures += 1;
                }
            }
        }

        if failures == HIGHLY_RATED_SUBJECTS.len() {
            warn!("every top-rated subject query failed, serving fallback data");
            return samples::sample_books();
        }

        let books = merge_ranked(batches);
        self.cache.set(HIGHLY_RATED_CACHE_KEY, &books);
        books
    }

    /// The curated editor's picks
    ///
    /// One exact-match query per curated entry, run concurrently. Each query
    /// contributes its first result when that result has a usable cover;
    /// entries with no match are dropped, preserving the relative order of
    /// the rest. Fallback data is only served when every query fails.
    pub async fn editors_picks(&self) -> Vec<Book> {
        if let Some(hit) = self.cache.get::<Vec<Book>>(EDITORS_PICKS_CACHE_KEY) {
            return hit;
        }

        let queries: Vec<String> = EDITORS_PICKS.iter().map(|entry| pick_query(entry)).collect();
        let requests: Vec<_> = queries
            .iter()
            .map(|query| self.client.search_volumes(query, SortOrder::Relevance, 0, 1))
            .collect();
        let outcomes = join_all(requests).await;

        let mut picks = Vec::new();
        let mut failures = 0;
        for (entry, outcome) in EDITORS_PICKS.iter().zip(outcomes) {
            match outcome {
                Ok(response) => picks.push(first_with_cover(&response.items)),
                Err(err) => {
                    warn!(error = %err, pick = entry, "editor's pick query failed");
                    failures += 1;
                    picks.push(None);
                }
            }
        }

        if failures == EDITORS_PICKS.len() {
            warn!("every editor's pick query failed, serving fallback data");
            return samples::editors_pick_books();
        }

        let books = collapse_picks(picks);
        self.cache.set(EDITORS_PICKS_CACHE_KEY, &books);
        books
    }

    /// Books in a single category
    ///
    /// Single `subject:` query with the usual cover filter and truncation.
    /// Never fails; falls back to the sample dataset.
    pub async fn category_search(
        &self,
        category: &str,
        limit: u32,
        order: SortOrder,
    ) -> Vec<Book> {
        let key = category_cache_key(category, limit, order);
        if let Some(hit) = self.cache.get::<Vec<Book>>(&key) {
            return hit;
        }

        let query = format!("subject:{}", category);
        match self
            .client
            .search_volumes(&query, order, 0, limit * SEARCH_OVERFETCH_FACTOR)
            .await
        {
            Ok(response) => {
                let books = collect_books(&response.items, limit as usize);
                self.cache.set(&key, &books);
                books
            }
            Err(err) => {
                warn!(error = %err, category, "category search failed, serving fallback data");
                samples::sample_books()
            }
        }
    }

    /// Full detail record for a single book
    ///
    /// A transport or catalog failure is answered with fallback details, but
    /// a volume that resolves with no usable cover is an error the caller
    /// must handle; there is no substitute cover to show on a detail page.
    pub async fn book_details(&self, id: &str) -> Result<BookDetails, CatalogError> {
        let key = details_cache_key(id);
        if let Some(hit) = self.cache.get::<BookDetails>(&key) {
            return Ok(hit);
        }

        let volume = match self.client.fetch_volume(id).await {
            Ok(volume) => volume,
            Err(err) => {
                warn!(error = %err, id, "detail fetch failed, serving fallback data");
                return Ok(samples::sample_book_details(id));
            }
        };

        let details = normalize::details_from_volume(&volume)?;
        self.cache.set(&key, &details);
        Ok(details)
    }

    async fn subject_page(&self, subject: &str) -> Result<VolumesResponse, CatalogError> {
        self.client
            .search_volumes(
                &format!("subject:{}", subject),
                SortOrder::Newest,
                0,
                SUBJECT_PAGE_SIZE,
            )
            .await
    }
}

/// Normalizes raw volumes, dropping coverless records, up to `limit`
fn collect_books(volumes: &[Volume], limit: usize) -> Vec<Book> {
    volumes
        .iter()
        .filter_map(normalize::book_from_volume)
        .take(limit)
        .collect()
}

/// First result of a pick query, if it carries a usable cover
fn first_with_cover(volumes: &[Volume]) -> Option<Book> {
    volumes.first().and_then(normalize::book_from_volume)
}

/// Flattens per-pick outcomes, dropping the misses and keeping order
fn collapse_picks(picks: Vec<Option<Book>>) -> Vec<Book> {
    picks.into_iter().flatten().collect()
}

/// Merges subject batches: dedupe by id, rank by rating, cap the length
fn merge_ranked(batches: Vec<Vec<Book>>) -> Vec<Book> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Book> = batches
        .into_iter()
        .flatten()
        .filter(|book| seen.insert(book.id.clone()))
        .collect();

    merged.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    merged.truncate(HIGHLY_RATED_LIMIT);
    merged
}

/// Whether a book's publication date falls in the pinned year
fn published_in_pinned_year(book: &Book) -> bool {
    book.published_date
        .as_deref()
        .is_some_and(|date| date.starts_with(HIGHLY_RATED_YEAR))
}

/// ANDs a subject filter onto a free-text query
fn compose_query(query: &str, category: Option<&str>) -> String {
    match category {
        Some(category) if !category.trim().is_empty() => {
            format!("{} subject:{}", query, category)
        }
        _ => query.to_string(),
    }
}

/// Turns a curated "Title by Author" entry into an exact-match query
fn pick_query(entry: &str) -> String {
    match entry.split_once(" by ") {
        Some((title, author)) => format!("intitle:\"{}\" inauthor:\"{}\"", title, author),
        None => format!("intitle:\"{}\"", entry),
    }
}

fn search_cache_key(
    query: &str,
    category: Option<&str>,
    sort: SortOrder,
    offset: u32,
    limit: u32,
) -> String {
    format!(
        "search_{}_{}_{}_{}_{}",
        query,
        category.unwrap_or("all"),
        sort.as_param(),
        offset,
        limit
    )
}

fn category_cache_key(category: &str, limit: u32, order: SortOrder) -> String {
    format!("category_{}_{}_{}", category, limit, order.as_param())
}

fn details_cache_key(id: &str) -> String {
    format!("book_{}", id)
}

/// The exact fallback payload for a failed search
fn fallback_search_results() -> SearchResults {
    let books = samples::sample_books();
    let total = books.len() as u32;
    SearchResults { books, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Condition, Format};

    fn test_book(id: &str, rating: f64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            author: "Test Author".to_string(),
            description: String::new(),
            cover_url: format!("https://books.google.com/books/content?id={}", id),
            rating,
            review_count: 100,
            categories: vec![],
            published_date: Some("2024-01-01".to_string()),
            is_used: false,
            condition: Condition::New,
            format: Format::Paperback,
            download_link: None,
            preview_link: None,
            purchase_link: None,
        }
    }

    fn offline_service() -> BookService {
        // Nothing listens on the discard port, so every request fails fast
        BookService::new(
            CatalogClient::with_base_url("http://127.0.0.1:9/volumes"),
            MemoryCache::new(),
        )
    }

    #[test]
    fn test_merge_ranked_dedupes_and_sorts() {
        let batches = vec![
            vec![test_book("a", 4.1), test_book("b", 4.9)],
            vec![test_book("a", 4.1), test_book("c", 3.2), test_book("d", 4.5)],
        ];

        let merged = merge_ranked(batches);

        let ids: Vec<&str> = merged.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"], "sorted by rating, no duplicates");
        for pair in merged.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }
    }

    #[test]
    fn test_merge_ranked_caps_at_ten() {
        let batch: Vec<Book> = (0..15)
            .map(|i| test_book(&format!("id{}", i), 3.0 + i as f64 * 0.1))
            .collect();

        let merged = merge_ranked(vec![batch]);

        assert_eq!(merged.len(), 10);
        assert_eq!(merged[0].id, "id14", "highest rated first");
    }

    #[test]
    fn test_collapse_picks_drops_misses_and_keeps_order() {
        let picks = vec![
            Some(test_book("first", 4.0)),
            None,
            Some(test_book("third", 4.0)),
            Some(test_book("fourth", 4.0)),
        ];

        let books = collapse_picks(picks);

        assert_eq!(books.len(), 3, "one miss shortens the list by one");
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "third", "fourth"]);
    }

    #[test]
    fn test_collect_books_respects_limit() {
        let response: VolumesResponse = serde_json::from_str(
            r#"{
                "totalItems": 3,
                "items": [
                    {"id": "v1", "volumeInfo": {"title": "One", "imageLinks": {"thumbnail": "http://books.google.com/books/content?id=v1&zoom=1"}}},
                    {"id": "v2", "volumeInfo": {"title": "Two", "imageLinks": {"thumbnail": "http://books.google.com/books/content?id=v2&zoom=1"}}},
                    {"id": "v3", "volumeInfo": {"title": "Three", "imageLinks": {"thumbnail": "http://books.google.com/books/content?id=v3&zoom=1"}}}
                ]
            }"#,
        )
        .expect("Failed to parse fixture");

        let books = collect_books(&response.items, 2);

        assert_eq!(books.len(), 2, "limit is never exceeded");
        assert_eq!(books[0].id, "v1");
    }

    #[test]
    fn test_collect_books_skips_coverless_records() {
        let response: VolumesResponse = serde_json::from_str(
            r#"{
                "totalItems": 2,
                "items": [
                    {"id": "bare", "volumeInfo": {"title": "No Cover"}},
                    {"id": "nice", "volumeInfo": {"title": "Covered", "imageLinks": {"thumbnail": "http://books.google.com/books/content?id=nice&zoom=1"}}}
                ]
            }"#,
        )
        .expect("Failed to parse fixture");

        let books = collect_books(&response.items, 10);

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "nice");
    }

    #[test]
    fn test_compose_query_appends_subject_filter() {
        assert_eq!(compose_query("rust", None), "rust");
        assert_eq!(
            compose_query("rust", Some("computers")),
            "rust subject:computers"
        );
        assert_eq!(compose_query("rust", Some("  ")), "rust");
    }

    #[test]
    fn test_pick_query_splits_on_first_by() {
        assert_eq!(
            pick_query("The Midnight Library by Matt Haig"),
            "intitle:\"The Midnight Library\" inauthor:\"Matt Haig\""
        );
        // Entry without an author clause searches by title alone
        assert_eq!(pick_query("Beowulf"), "intitle:\"Beowulf\"");
    }

    #[test]
    fn test_published_in_pinned_year_matches_prefix() {
        let mut book = test_book("x", 4.0);
        assert!(published_in_pinned_year(&book));

        book.published_date = Some("2019-05-01".to_string());
        assert!(!published_in_pinned_year(&book));

        book.published_date = None;
        assert!(!published_in_pinned_year(&book));
    }

    #[test]
    fn test_cache_keys_distinguish_parameters() {
        let a = search_cache_key("rust", None, SortOrder::Relevance, 0, 20);
        let b = search_cache_key("rust", Some("computers"), SortOrder::Relevance, 0, 20);
        let c = search_cache_key("rust", None, SortOrder::Newest, 0, 20);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_search_serves_cache_before_fetching() {
        let service = offline_service();
        let seeded = SearchResults {
            books: vec![test_book("cached", 4.4)],
            total: 1,
        };
        let key = search_cache_key("rust", None, SortOrder::Relevance, 0, 20);
        service.cache.set(&key, &seeded);

        // The client is unreachable, so a hit proves the cache was consulted
        let results = service
            .search("rust", None, SortOrder::Relevance, 0, 20)
            .await;

        assert_eq!(results, seeded);
    }

    #[tokio::test]
    async fn test_search_failure_serves_exact_fallback() {
        let service = offline_service();

        let results = service
            .search("anything", None, SortOrder::Relevance, 0, 20)
            .await;

        assert_eq!(results.books, samples::sample_books());
        assert_eq!(results.total, samples::sample_books().len() as u32);
    }

    #[tokio::test]
    async fn test_fallback_results_are_not_cached() {
        let service = offline_service();

        service
            .search("anything", None, SortOrder::Relevance, 0, 20)
            .await;

        assert!(
            service.cache.is_empty(),
            "fallback data must not poison the cache"
        );
    }

    #[tokio::test]
    async fn test_book_details_transport_failure_serves_fallback() {
        let service = offline_service();

        let details = service
            .book_details("someVolumeId")
            .await
            .expect("Transport failure should fall back, not error");

        assert_eq!(details.book.id, "someVolumeId");
    }
}
