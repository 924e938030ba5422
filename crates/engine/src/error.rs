//! The module contains the error the engine can throw.
//!
//! Every fallible operation resolves into one of four classes:
//!
//! - [`Validation`] for input the caller can fix (bad amount, name too long).
//! - [`NotFound`] for ids that do not resolve to a stored entity.
//! - [`Conflict`] for duplicate category names and delete-while-referenced.
//! - [`Database`] for storage failures surfaced by sea-orm.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`NotFound`]: EngineError::NotFound
//!  [`Conflict`]: EngineError::Conflict
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
///
/// The message of every non-[`Database`](EngineError::Database) variant is
/// written for the API client and is surfaced verbatim.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
