//! People service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowedBook, Person, PersonPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct PeopleService {
    repository: Repository,
}

impl PeopleService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all people
    pub async fn list(&self) -> AppResult<Vec<Person>> {
        self.repository.people.list_all().await
    }

    /// Get a person by ID
    pub async fn get(&self, id: i32) -> AppResult<Person> {
        self.repository.people.get_by_id(id).await
    }

    /// Register a new person; full names must be unique
    pub async fn create(&self, person: PersonPayload) -> AppResult<Person> {
        person.validate()?;

        if self.repository.people.find_by_name(&person.full_name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A person named '{}' already exists",
                person.full_name
            )));
        }

        self.repository.people.create(&person).await
    }

    /// Replace all fields of a person
    pub async fn update(&self, id: i32, person: PersonPayload) -> AppResult<Person> {
        person.validate()?;

        if let Some(existing) = self.repository.people.find_by_name(&person.full_name).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "A person named '{}' already exists",
                    person.full_name
                )));
            }
        }

        self.repository.people.update(id, &person).await
    }

    /// Delete a person; any books they hold are returned to the shelf
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.people.delete(id).await
    }

    /// Books currently held by a person, each with the expired flag derived
    /// from the loan timestamp
    pub async fn books_of(&self, person_id: i32) -> AppResult<Vec<BorrowedBook>> {
        // Verify the person exists
        self.repository.people.get_by_id(person_id).await?;

        let now = Utc::now();
        let books = self.repository.books.list_owned_by(person_id).await?;

        Ok(books
            .into_iter()
            .map(|book| BorrowedBook::from_book(book, now))
            .collect())
    }

    /// Exact-name lookup
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Person>> {
        self.repository.people.find_by_name(name).await
    }
}
