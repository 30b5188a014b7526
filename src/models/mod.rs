//! Data models for Libris

pub mod book;
pub mod person;

// Re-export commonly used types
pub use book::{Book, BookPayload, BookQuery, BorrowedBook};
pub use person::{Person, PersonPayload};
