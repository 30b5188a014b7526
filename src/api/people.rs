//! People endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{BorrowedBook, Person, PersonPayload},
};

/// Person detail response: the person and the books they currently hold,
/// each flagged when the loan has run past the loan period
#[derive(Serialize, ToSchema)]
pub struct PersonDetails {
    pub person: Person,
    pub books: Vec<BorrowedBook>,
}

/// People listing parameters
#[derive(Deserialize, IntoParams)]
pub struct PeopleQuery {
    /// Exact full name to look up
    pub name: Option<String>,
}

/// List people, or look one up by exact name
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    params(PeopleQuery),
    responses(
        (status = 200, description = "List of people", body = Vec<Person>)
    )
)]
pub async fn list_people(
    State(state): State<crate::AppState>,
    Query(query): Query<PeopleQuery>,
) -> AppResult<Json<Vec<Person>>> {
    let people = match query.name {
        Some(name) => state
            .services
            .people
            .find_by_name(&name)
            .await?
            .into_iter()
            .collect(),
        None => state.services.people.list().await?,
    };
    Ok(Json(people))
}

/// Get a person and their borrowed books
#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person details", body = PersonDetails),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PersonDetails>> {
    let person = state.services.people.get(id).await?;
    let books = state.services.people.books_of(id).await?;
    Ok(Json(PersonDetails { person, books }))
}

/// Register a new person
#[utoipa::path(
    post,
    path = "/people",
    tag = "people",
    request_body = PersonPayload,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "A person with this name already exists")
    )
)]
pub async fn create_person(
    State(state): State<crate::AppState>,
    Json(payload): Json<PersonPayload>,
) -> AppResult<(StatusCode, Json<Person>)> {
    let created = state.services.people.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing person (full replacement)
#[utoipa::path(
    patch,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    request_body = PersonPayload,
    responses(
        (status = 200, description = "Person updated", body = Person),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Person not found"),
        (status = 409, description = "A person with this name already exists")
    )
)]
pub async fn update_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PersonPayload>,
) -> AppResult<Json<Person>> {
    let updated = state.services.people.update(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a person; books they hold go back on the shelf
#[utoipa::path(
    delete,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Person not found")
    )
)]
pub async fn delete_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.people.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
