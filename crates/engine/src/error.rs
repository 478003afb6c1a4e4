//! Error taxonomy for the engine.
//!
//! Every database failure surfaces as [`Database`]; foreign-key
//! violations raised by the database are distinguished as
//! [`InvalidReference`] so the server can map them to 422 instead
//! of 500.
//!
//! [`Database`]: EngineError::Database
//! [`InvalidReference`]: EngineError::InvalidReference

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found")]
    KeyNotFound(String),
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Classifies a write failure: constraint violations become
    /// [`EngineError::InvalidReference`] with `context` as the message,
    /// everything else stays a database error.
    pub(crate) fn from_write(err: DbErr, context: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_))
            | Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::InvalidReference(context.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidReference(a), Self::InvalidReference(b)) => a == b,
            (Self::InvalidParameter(a), Self::InvalidParameter(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
