//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{Book, BookPayload, BookQuery, Person},
    services::books::SearchOutcome,
};

/// Book detail response. When the book is on the shelf the full people list
/// is included so a borrower can be picked.
#[derive(Serialize, ToSchema)]
pub struct BookDetails {
    /// The book itself
    pub book: Book,
    /// Current holder, if any
    pub owner: Option<Person>,
    /// All registered people; present only when the book is unowned
    pub people: Option<Vec<Person>>,
}

/// Check-out request
#[derive(Deserialize, ToSchema)]
pub struct CheckOutRequest {
    /// The borrowing person
    pub person_id: i32,
}

/// Prefix search parameters
#[derive(Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Name prefix to search for (case-sensitive)
    #[serde(rename = "bookName")]
    pub book_name: Option<String>,
}

/// Prefix search response
#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    /// Outcome message; absent when no search input was given
    pub message: Option<String>,
    /// The matching book, if one was found
    pub book: Option<Book>,
    /// The holder, when the matching book is currently borrowed
    pub holder: Option<Person>,
}

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list(&query).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.books.get(id).await?;
    let owner = state.services.books.owner(id).await?;

    let people = if owner.is_none() {
        Some(state.services.people.list().await?)
    } else {
        None
    };

    Ok(Json(BookDetails { book, owner, people }))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book; the current owner is preserved
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check a book out to a person
#[utoipa::path(
    patch,
    path = "/books/{id}/do",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Book checked out", body = Book),
        (status = 404, description = "Book or person not found"),
        (status = 409, description = "Book is already borrowed")
    )
)]
pub async fn check_out(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CheckOutRequest>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.check_out(id, request.person_id).await?;
    Ok(Json(book))
}

/// Return a book to the shelf
#[utoipa::path(
    patch,
    path = "/books/{id}/undo",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.return_book(id).await?;
    Ok(Json(book))
}

/// Search for a book by name prefix
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search outcome", body = SearchResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let name = match query.book_name {
        Some(name) => name,
        None => {
            // No input yet: an empty search form
            return Ok(Json(SearchResponse {
                message: None,
                book: None,
                holder: None,
            }));
        }
    };

    let response = match state.services.books.search(&name).await? {
        SearchOutcome::NoMatch => SearchResponse {
            message: Some("No books found".to_string()),
            book: None,
            holder: None,
        },
        SearchOutcome::Available(book) => SearchResponse {
            message: Some("The book is available".to_string()),
            book: Some(book),
            holder: None,
        },
        SearchOutcome::Held { book, holder } => SearchResponse {
            message: Some(format!("The book is currently held by {}", holder.full_name)),
            book: Some(book),
            holder: Some(holder),
        },
    };

    Ok(Json(response))
}
