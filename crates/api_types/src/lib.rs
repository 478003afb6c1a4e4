//! Request/response types shared between the server and its clients.
//!
//! Field names are lower snake case throughout and, for the schema
//! discovery types, mirror the underlying `information_schema` column
//! names instead of inventing a parallel vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Deserializer for nullable PATCH fields: an absent field stays
/// `None`, an explicit JSON `null` becomes `Some(None)` and clears the
/// column.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Pagination envelope shared by every list endpoint.
pub mod page {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PageMeta {
        pub limit: u64,
        pub offset: u64,
        pub total: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Paginated<T> {
        pub data: Vec<T>,
        pub pagination: PageMeta,
    }
}

pub mod account {
    use super::*;

    /// Request body for creating an account.
    ///
    /// `current_balance_minor` cannot be supplied: it starts at the
    /// opening balance and is maintained outside this API.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub account_type_id: i32,
        pub account_name: String,
        #[serde(default)]
        pub currency_code: Option<String>,
        #[serde(default)]
        pub opening_balance_minor: Option<i64>,
        #[serde(default)]
        pub opening_balance_date: Option<NaiveDate>,
        #[serde(default)]
        pub account_number: Option<String>,
        #[serde(default)]
        pub institution_name: Option<String>,
        #[serde(default)]
        pub credit_limit_minor: Option<i64>,
        #[serde(default)]
        pub is_closed: Option<bool>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    /// Partial update; omitted fields stay unchanged, an explicit
    /// `null` clears a nullable field. The opening balance and its
    /// date are immutable after creation.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AccountPatch {
        pub account_type_id: Option<i32>,
        pub account_name: Option<String>,
        pub currency_code: Option<String>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub account_number: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub institution_name: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub credit_limit_minor: Option<Option<i64>>,
        pub is_closed: Option<bool>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub notes: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub account_id: i32,
        pub account_type_id: i32,
        pub account_name: String,
        pub account_number: Option<String>,
        pub institution_name: Option<String>,
        pub currency_code: String,
        pub opening_balance_minor: i64,
        /// Read-only; never recomputed by this service.
        pub current_balance_minor: i64,
        pub credit_limit_minor: Option<i64>,
        pub is_closed: bool,
        pub notes: Option<String>,
        pub opening_balance_date: NaiveDate,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    /// Transaction kind accepted by the API.
    ///
    /// The database also knows a `transfer` kind; transfers are out of
    /// scope here and are rejected at deserialization.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionType {
        Income,
        Expense,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionStatus {
        Pending,
        Cleared,
        Reconciled,
        Void,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub account_id: i32,
        pub transaction_type: TransactionType,
        pub amount_minor: i64,
        pub currency_code: String,
        pub transaction_date: NaiveDate,
        #[serde(default)]
        pub status: Option<TransactionStatus>,
        #[serde(default)]
        pub payee_id: Option<i32>,
        #[serde(default)]
        pub category_id: Option<i32>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub reference_number: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionPatch {
        pub account_id: Option<i32>,
        pub transaction_type: Option<TransactionType>,
        pub amount_minor: Option<i64>,
        pub currency_code: Option<String>,
        pub transaction_date: Option<NaiveDate>,
        pub status: Option<TransactionStatus>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub payee_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub category_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub description: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub reference_number: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub location: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub notes: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub transaction_id: i32,
        pub account_id: i32,
        pub transaction_type: TransactionType,
        pub amount_minor: i64,
        pub currency_code: String,
        pub transaction_date: NaiveDate,
        pub status: TransactionStatus,
        pub payee_id: Option<i32>,
        pub category_id: Option<i32>,
        pub description: Option<String>,
        pub reference_number: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod category {
    use super::*;

    /// Matches the database CHECK constraint on `categories.category_type`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryType {
        Income,
        Expense,
        Transfer,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub category_name: String,
        pub category_type: CategoryType,
        #[serde(default)]
        pub category_group: Option<String>,
        #[serde(default)]
        pub color_code: Option<String>,
        #[serde(default)]
        pub icon_name: Option<String>,
        #[serde(default)]
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryPatch {
        pub category_name: Option<String>,
        pub category_type: Option<CategoryType>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub category_group: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub color_code: Option<Option<String>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub icon_name: Option<Option<String>>,
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub category_id: i32,
        pub category_name: String,
        pub category_type: CategoryType,
        pub category_group: Option<String>,
        pub color_code: Option<String>,
        pub icon_name: Option<String>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }
}

pub mod payee {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeNew {
        pub payee_name: String,
        #[serde(default)]
        pub default_category_id: Option<i32>,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default)]
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PayeePatch {
        pub payee_name: Option<String>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub default_category_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "crate::double_option")]
        pub notes: Option<Option<String>>,
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeView {
        pub payee_id: i32,
        pub payee_name: String,
        pub default_category_id: Option<i32>,
        pub notes: Option<String>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

/// Read-only reference tables seeded at database initialization.
pub mod reference {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountTypeView {
        pub account_type_id: i32,
        pub type_name: String,
        pub description: Option<String>,
        pub is_asset: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyView {
        pub currency_code: String,
        pub currency_name: String,
        pub currency_symbol: Option<String>,
        pub decimal_places: i32,
        pub is_active: bool,
    }
}

/// Schema discovery responses.
///
/// These deliberately keep the raw `information_schema` vocabulary
/// (`is_nullable` is the catalog's "YES"/"NO" string, not a bool) so the
/// API stays a thin, literal reflection of the catalog.
pub mod schema {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ColumnDef {
        pub column_name: String,
        pub data_type: String,
        pub is_nullable: String,
        pub column_default: Option<String>,
        pub character_maximum_length: Option<i32>,
        pub numeric_precision: Option<i32>,
        pub numeric_scale: Option<i32>,
    }

    /// One table or column constraint.
    ///
    /// `foreign_table_name`/`foreign_column_name` are populated if and
    /// only if `constraint_type` is `FOREIGN KEY`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ConstraintDef {
        pub constraint_name: String,
        pub constraint_type: String,
        pub column_name: Option<String>,
        pub foreign_table_name: Option<String>,
        pub foreign_column_name: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct TableSchema {
        pub name: String,
        pub table_type: String,
        pub columns: Vec<ColumnDef>,
        pub constraints: Vec<ConstraintDef>,
    }

    /// A directed foreign-key edge between two tables.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Relationship {
        pub from_table: String,
        pub from_column: String,
        pub to_table: String,
        pub to_column: String,
        pub constraint_name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct DatabaseSchema {
        pub tables: Vec<TableSchema>,
        pub relationships: Vec<Relationship>,
    }

    /// Lookup-table contents keyed by the requested `data_type`.
    ///
    /// `data` is a flat array for a single type and an object of
    /// arrays for `all`; consumers must not assume a closed set of
    /// row fields.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ReferenceData {
        pub data_type: String,
        pub data: serde_json::Value,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub environment: String,
        pub version: String,
    }
}
