//! Cache module for storing API responses in memory
//!
//! This module provides an in-memory cache that holds normalized catalog data
//! with a fixed TTL (time-to-live). Expired entries are evicted lazily on the
//! next read, so a stale key stops occupying storage as soon as it is touched.

mod store;

pub use store::MemoryCache;
