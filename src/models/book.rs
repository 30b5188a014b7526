//! Book model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Days a book may be held before its loan is flagged as expired
pub const LOAN_PERIOD_DAYS: i64 = 10;

/// A catalog entry, possibly held by a person
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub publish_year: i32,
    /// When the book was checked out; null while it is on the shelf
    pub taken_date: Option<DateTime<Utc>>,
    /// Current holder; null while the book is on the shelf
    pub person_id: Option<i32>,
}

/// A book as listed for its holder, carrying the derived expired flag.
/// The flag is computed at read time and never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowedBook {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub publish_year: i32,
    pub taken_date: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

impl BorrowedBook {
    /// Build the loan view of a book, deriving the expired flag at `now`
    pub fn from_book(book: Book, now: DateTime<Utc>) -> Self {
        Self {
            is_expired: book.taken_date.map(|d| is_expired(d, now)).unwrap_or(false),
            id: book.id,
            name: book.name,
            author: book.author,
            publish_year: book.publish_year,
            taken_date: book.taken_date,
        }
    }
}

/// Create/update request for a book.
/// Ownership fields are absent on purpose: the edit path never touches them.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[validate(length(min = 3, max = 128, message = "Name should be between 3 and 128 characters"))]
    pub name: String,
    #[validate(length(min = 3, max = 256, message = "Author should be between 3 and 256 characters"))]
    pub author: String,
    pub publish_year: i32,
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Zero-based page number
    pub page: Option<i64>,
    /// Page size; pagination applies only when both page and size are given
    pub books_per_page: Option<i64>,
    /// Order the listing by publish year
    #[serde(default)]
    pub sort_by_year: bool,
}

/// True when a loan started at `taken_date` exceeds the loan period at `now`
pub fn is_expired(taken_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    taken_date < now - Duration::days(LOAN_PERIOD_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn loan_expires_strictly_after_ten_days() {
        let now = Utc::now();
        assert!(!is_expired(now - Duration::days(9), now));
        assert!(!is_expired(now - Duration::days(10), now));
        assert!(is_expired(now - Duration::days(11), now));
    }

    #[test]
    fn borrowed_book_without_taken_date_is_not_expired() {
        let book = Book {
            id: 1,
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publish_year: 1965,
            taken_date: None,
            person_id: None,
        };
        let view = BorrowedBook::from_book(book, Utc::now());
        assert!(!view.is_expired);
    }

    #[test]
    fn payload_rejects_short_name() {
        let payload = BookPayload {
            name: "It".to_string(),
            author: "Stephen King".to_string(),
            publish_year: 1986,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_accepts_valid_book() {
        let payload = BookPayload {
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publish_year: 1965,
        };
        assert!(payload.validate().is_ok());
    }
}
