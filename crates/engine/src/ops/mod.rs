//! Operations exposed by the [`Engine`].
//!
//! Each operation borrows one connection from the pool held by the
//! engine for the duration of its queries; there is no cross-request
//! shared mutable state and no multi-statement transaction in any read
//! path.

use sea_orm::DatabaseConnection;
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

mod accounts;
mod catalog;
mod categories;
mod payees;
mod reference;
mod transactions;

pub use accounts::{AccountDraft, AccountFilter, AccountPatch};
pub use categories::{CategoryDraft, CategoryFilter, CategoryPatch};
pub use payees::{PayeeDraft, PayeeFilter, PayeePatch};
pub use transactions::{TransactionDraft, TransactionFilter, TransactionPatch};

/// Limit/offset pair for list operations. Range validation happens at
/// the HTTP layer; the engine takes the page as given.
#[derive(Clone, Copy, Debug)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.database
    }
}

/// The builder for `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database pool. The HTTP layer owns the pool;
    /// the engine only borrows connections from it.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

/// NFC-normalizes and trims a user-supplied name, rejecting the empty
/// result.
pub(crate) fn normalize_required_name(name: &str, what: &str) -> ResultEngine<String> {
    let normalized: String = name.nfc().collect::<String>().trim().to_string();
    if normalized.is_empty() {
        return Err(EngineError::InvalidParameter(format!(
            "{what} name must not be empty"
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_keeps_content() {
        let name = normalize_required_name("  Caffè  ", "category").unwrap();
        assert_eq!(name, "Caffè");
    }

    #[test]
    fn normalize_rejects_blank() {
        let err = normalize_required_name("   ", "payee").unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter(_)));
    }
}
