//! HTTP request handlers
//!
//! Handlers stay thin: decode the request, call the service, shape the reply.

pub mod files;
pub mod health;
pub mod images;
pub mod results;
