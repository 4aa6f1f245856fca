//! Bookscout Library
//!
//! This module exposes the cache, catalog, and services modules for use in
//! integration tests.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod services;
