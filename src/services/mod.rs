//! Cache-wrapped book discovery operations
//!
//! The service layer sits between the UI and the catalog client: it checks
//! the cache, fetches and normalizes on a miss, and substitutes static
//! fallback data when the catalog is unreachable.

pub mod books;
pub mod samples;

pub use books::BookService;
