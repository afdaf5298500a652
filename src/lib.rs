//! Photo gallery backend
//!
//! Lists image files under a folder filtered by a regular expression and
//! serves originals and bounded JPEG previews, keeping recently used bytes
//! and directory scans in memory.

pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;
