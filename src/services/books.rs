//! Books service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload, BookQuery, Person},
    repository::Repository,
};

/// The four mutually exclusive listing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookListing {
    /// Natural order, everything
    All,
    /// Everything, most recent publish year first
    SortedByYear,
    /// One zero-based page; ascending publish year when sorted
    Paged {
        page: i64,
        per_page: i64,
        sort_by_year: bool,
    },
}

impl BookListing {
    /// Select the listing mode from the query parameters. Pagination wins
    /// whenever both page and size are present (carrying its own sort flag),
    /// then the sort flag alone, then the plain listing.
    pub fn from_query(query: &BookQuery) -> Self {
        match (query.page, query.books_per_page) {
            (Some(page), Some(per_page)) => BookListing::Paged {
                page,
                per_page,
                sort_by_year: query.sort_by_year,
            },
            _ if query.sort_by_year => BookListing::SortedByYear,
            _ => BookListing::All,
        }
    }
}

/// Outcome of a prefix search over book names
pub enum SearchOutcome {
    NoMatch,
    Available(Book),
    Held { book: Book, holder: Person },
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books in the mode selected by the query
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        match BookListing::from_query(query) {
            BookListing::All => self.repository.books.list_all().await,
            BookListing::SortedByYear => self.repository.books.list_by_year_desc().await,
            BookListing::Paged {
                page,
                per_page,
                sort_by_year,
            } => {
                if page < 0 || per_page <= 0 {
                    return Err(AppError::BadRequest(
                        "page must be non-negative and books_per_page positive".to_string(),
                    ));
                }
                self.repository.books.list_page(page, per_page, sort_by_year).await
            }
        }
    }

    /// Get a book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book after validating the payload
    pub async fn create(&self, book: BookPayload) -> AppResult<Book> {
        book.validate()?;
        self.repository.books.create(&book).await
    }

    /// Update a book's fields; the current owner is preserved
    pub async fn update(&self, id: i32, book: BookPayload) -> AppResult<Book> {
        book.validate()?;
        self.repository.books.update(id, &book).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Check a book out to a person, stamping the loan with the current time
    pub async fn check_out(&self, book_id: i32, person_id: i32) -> AppResult<Book> {
        // Verify the borrower exists
        self.repository.people.get_by_id(person_id).await?;
        self.repository.books.check_out(book_id, person_id, Utc::now()).await
    }

    /// Return a book to the shelf
    pub async fn return_book(&self, book_id: i32) -> AppResult<Book> {
        self.repository.books.return_book(book_id).await
    }

    /// Current holder of a book, if any
    pub async fn owner(&self, book_id: i32) -> AppResult<Option<Person>> {
        self.repository.books.owner_of(book_id).await
    }

    /// Find the first book whose name starts with the given prefix and
    /// report whether it is held, available, or missing entirely
    pub async fn search(&self, prefix: &str) -> AppResult<SearchOutcome> {
        match self.repository.books.find_by_name_prefix(prefix).await? {
            None => Ok(SearchOutcome::NoMatch),
            Some(book) => match book.person_id {
                None => Ok(SearchOutcome::Available(book)),
                Some(person_id) => {
                    let holder = self.repository.people.get_by_id(person_id).await?;
                    Ok(SearchOutcome::Held { book, holder })
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookQuery;

    #[test]
    fn plain_listing_when_no_parameters() {
        let query = BookQuery::default();
        assert_eq!(BookListing::from_query(&query), BookListing::All);
    }

    #[test]
    fn sort_flag_alone_selects_sorted_listing() {
        let query = BookQuery {
            sort_by_year: true,
            ..BookQuery::default()
        };
        assert_eq!(BookListing::from_query(&query), BookListing::SortedByYear);
    }

    #[test]
    fn page_and_size_select_pagination() {
        let query = BookQuery {
            page: Some(0),
            books_per_page: Some(2),
            sort_by_year: false,
        };
        assert_eq!(
            BookListing::from_query(&query),
            BookListing::Paged {
                page: 0,
                per_page: 2,
                sort_by_year: false
            }
        );
    }

    #[test]
    fn pagination_takes_precedence_over_sorting() {
        let query = BookQuery {
            page: Some(1),
            books_per_page: Some(5),
            sort_by_year: true,
        };
        assert_eq!(
            BookListing::from_query(&query),
            BookListing::Paged {
                page: 1,
                per_page: 5,
                sort_by_year: true
            }
        );
    }

    #[test]
    fn page_without_size_falls_back_to_sort_flag() {
        let query = BookQuery {
            page: Some(1),
            books_per_page: None,
            sort_by_year: true,
        };
        assert_eq!(BookListing::from_query(&query), BookListing::SortedByYear);
    }
}
