//! API handlers for the Libris REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod people;
