//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchProvider`].

pub mod serpapi;

pub use serpapi::SerpApiProvider;
