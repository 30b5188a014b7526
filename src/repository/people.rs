//! People repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Person, PersonPayload},
};

#[derive(Clone)]
pub struct PeopleRepository {
    pool: Pool<Postgres>,
}

/// Map a unique-index violation on the name to a conflict; two concurrent
/// inserts of the same name race past the service-level check, and the
/// loser must not surface as a 500
fn map_name_conflict(e: sqlx::Error, name: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("A person named '{}' already exists", name))
        }
        _ => AppError::from(e),
    }
}

impl PeopleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All people in natural order
    pub async fn list_all(&self) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>("SELECT * FROM person ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(people)
    }

    /// Get person by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Person> {
        sqlx::query_as::<_, Person>("SELECT * FROM person WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))
    }

    /// Exact-name lookup
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Person>> {
        let person =
            sqlx::query_as::<_, Person>("SELECT * FROM person WHERE full_name = $1 ORDER BY id LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(person)
    }

    /// Insert a new person
    pub async fn create(&self, person: &PersonPayload) -> AppResult<Person> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Person>(
            "INSERT INTO person (full_name, year_of_birth, email) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&person.full_name)
        .bind(person.year_of_birth)
        .bind(&person.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_name_conflict(e, &person.full_name))?;

        tx.commit().await?;
        Ok(created)
    }

    /// Replace all fields of a person
    pub async fn update(&self, id: i32, person: &PersonPayload) -> AppResult<Person> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Person>(
            "UPDATE person SET full_name = $1, year_of_birth = $2, email = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&person.full_name)
        .bind(person.year_of_birth)
        .bind(&person.email)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_name_conflict(e, &person.full_name))?
        .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a person. Any books they still hold go back on the shelf in the
    /// same transaction, keeping owner and loan timestamp paired.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE book SET person_id = NULL, taken_date = NULL WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Person with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
