//! Person model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A registered library member
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i32,
    pub full_name: String,
    pub year_of_birth: i32,
    pub email: String,
}

/// Create/update request for a person
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PersonPayload {
    #[validate(length(min = 2, max = 100, message = "Name should be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(range(min = 0, message = "Year of birth should not be negative"))]
    pub year_of_birth: i32,
    #[validate(
        length(max = 254, message = "Email should be at most 254 characters"),
        email(message = "Invalid email format")
    )]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn payload() -> PersonPayload {
        PersonPayload {
            full_name: "Alice".to_string(),
            year_of_birth: 1990,
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn payload_accepts_valid_person() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn payload_rejects_malformed_email() {
        let mut p = payload();
        p.email = "not-an-email".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn payload_rejects_single_character_name() {
        let mut p = payload();
        p.full_name = "A".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn payload_rejects_email_longer_than_column() {
        let mut p = payload();
        // Syntactically fine, but longer than the email column holds
        p.email = format!("{}@example.com", "a".repeat(250));
        assert!(p.validate().is_err());
    }

    #[test]
    fn payload_rejects_negative_year_of_birth() {
        let mut p = payload();
        p.year_of_birth = -1;
        assert!(p.validate().is_err());
    }
}
