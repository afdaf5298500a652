//! Centralized error handling for the photo gallery
//!
//! Every fallible operation in the library returns [`GalleryResult`]. Errors
//! are local to the request that produced them: a failed scan or load never
//! inserts a cache entry, and cache eviction itself cannot fail.
//!
//! # Error Categories
//!
//! - **Input errors**: invalid regular expressions, malformed request data
//! - **Lookup errors**: missing directories and files
//! - **Format errors**: files that cannot be turned into a preview
//! - **Runtime errors**: I/O failures, worker pool failures, bad configuration
//!
//! # Usage
//!
//! ```rust
//! use photo_gallery::errors::{GalleryError, GalleryResult};
//!
//! fn example_function(pattern: &str) -> GalleryResult<regex::Regex> {
//!     regex::Regex::new(pattern).map_err(|e| GalleryError::invalid_pattern(pattern, e))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using GalleryError
pub type GalleryResult<T> = Result<T, GalleryError>;
