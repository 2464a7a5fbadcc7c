//! Data models for the book catalog

pub mod book;

// Re-export commonly used types
pub use book::{Book, ValidationFailure};
