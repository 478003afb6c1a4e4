//! HTTP layer: axum routers over the engine.
//!
//! Every error leaves this crate in the shared envelope
//! `{"error": {"code", "message", "details"?}}` with a stable
//! machine-readable `code`; the primary consumers of this API are
//! tools and agents, not humans.

use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use serde::Serialize;
use serde_json::json;

pub use server::{run, run_with_listener, spawn_with_listener};

mod accounts;
mod categories;
mod payees;
mod reference;
mod schema;
mod server;
mod transactions;

pub mod types {
    pub use api_types::account::{AccountNew, AccountPatch, AccountView};
    pub use api_types::category::{CategoryNew, CategoryPatch, CategoryType, CategoryView};
    pub use api_types::health::Health;
    pub use api_types::page::{PageMeta, Paginated};
    pub use api_types::payee::{PayeeNew, PayeePatch, PayeeView};
    pub use api_types::reference::{AccountTypeView, CurrencyView};
    pub use api_types::schema::{
        ColumnDef, ConstraintDef, DatabaseSchema, ReferenceData, Relationship, TableSchema,
    };
    pub use api_types::transaction::{
        TransactionNew, TransactionPatch, TransactionStatus, TransactionType, TransactionView,
    };
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Schema discovery: the requested name is not a base table of the
    /// public schema.
    TableNotFound(String),
    InvalidParameter(String),
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

fn envelope(
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
) -> axum::response::Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code,
            message,
            details,
        },
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Engine(EngineError::KeyNotFound(what)) => envelope(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{what} not found"),
                None,
            ),
            ServerError::Engine(EngineError::InvalidReference(reason)) => envelope(
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "invalid reference".to_string(),
                Some(json!({ "reason": reason })),
            ),
            ServerError::Engine(EngineError::InvalidParameter(message)) => envelope(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PARAMETER",
                message,
                None,
            ),
            ServerError::Engine(EngineError::Database(db_err)) => {
                // Raw driver errors stay in the logs; clients get a
                // uniform 500.
                tracing::error!("database error: {db_err}");
                envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "internal database error".to_string(),
                    None,
                )
            }
            ServerError::TableNotFound(table_name) => envelope(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Table '{table_name}' not found in public schema"),
                Some(json!({ "table_name": table_name, "schema": "public" })),
            ),
            ServerError::InvalidParameter(message) => envelope(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PARAMETER",
                message,
                None,
            ),
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Validates limit/offset query parameters against the endpoint's
/// bounds and produces the engine page.
fn page_from(
    limit: Option<u64>,
    offset: Option<u64>,
    default_limit: u64,
    max_limit: u64,
) -> Result<engine::Page, ServerError> {
    let limit = limit.unwrap_or(default_limit);
    if limit < 1 || limit > max_limit {
        return Err(ServerError::InvalidParameter(format!(
            "limit must be between 1 and {max_limit}"
        )));
    }
    Ok(engine::Page {
        limit,
        offset: offset.unwrap_or(0),
    })
}
