//! Database access layer: sea-orm entities for the fixed expense
//! schema, the CRUD operations over them, and the catalog-introspection
//! subsystem backing the schema-discovery API.

pub use catalog::{ColumnInfo, ConstraintInfo, FkEdge, SchemaSnapshot, TableInfo};
pub use categories::CategoryKind;
pub use error::EngineError;
pub use ops::{
    AccountDraft, AccountFilter, AccountPatch, CategoryDraft, CategoryFilter, CategoryPatch,
    Engine, EngineBuilder, Page, PayeeDraft, PayeeFilter, PayeePatch, TransactionDraft,
    TransactionFilter, TransactionPatch,
};
pub use transactions::{TransactionKind, TransactionStatus};

pub mod accounts;
pub mod account_types;
pub mod catalog;
pub mod categories;
pub mod currencies;
pub mod payees;
pub mod transactions;

mod error;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
