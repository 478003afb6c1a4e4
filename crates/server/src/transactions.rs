//! Transactions API endpoints

use api_types::page::{PageMeta, Paginated};
use api_types::transaction::{
    TransactionNew, TransactionPatch, TransactionStatus, TransactionType, TransactionView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{ServerError, page_from, server::ServerState};

fn kind_to_engine(kind: TransactionType) -> engine::TransactionKind {
    match kind {
        TransactionType::Income => engine::TransactionKind::Income,
        TransactionType::Expense => engine::TransactionKind::Expense,
    }
}

fn kind_from_engine(kind: engine::TransactionKind) -> TransactionType {
    match kind {
        engine::TransactionKind::Income => TransactionType::Income,
        engine::TransactionKind::Expense => TransactionType::Expense,
    }
}

fn status_to_engine(status: TransactionStatus) -> engine::TransactionStatus {
    match status {
        TransactionStatus::Pending => engine::TransactionStatus::Pending,
        TransactionStatus::Cleared => engine::TransactionStatus::Cleared,
        TransactionStatus::Reconciled => engine::TransactionStatus::Reconciled,
        TransactionStatus::Void => engine::TransactionStatus::Void,
    }
}

fn status_from_engine(status: engine::TransactionStatus) -> TransactionStatus {
    match status {
        engine::TransactionStatus::Pending => TransactionStatus::Pending,
        engine::TransactionStatus::Cleared => TransactionStatus::Cleared,
        engine::TransactionStatus::Reconciled => TransactionStatus::Reconciled,
        engine::TransactionStatus::Void => TransactionStatus::Void,
    }
}

/// The type and status columns are CHECK-constrained strings in the
/// database; an unknown value here means a corrupted row, reported as
/// an engine error rather than a panic.
fn view(model: engine::transactions::Model) -> Result<TransactionView, ServerError> {
    let kind = engine::TransactionKind::try_from(model.transaction_type.as_str())?;
    let status = engine::TransactionStatus::try_from(model.status.as_str())?;

    Ok(TransactionView {
        transaction_id: model.transaction_id,
        account_id: model.account_id,
        transaction_type: kind_from_engine(kind),
        amount_minor: model.amount_minor,
        currency_code: model.currency_code,
        transaction_date: model.transaction_date,
        status: status_from_engine(status),
        payee_id: model.payee_id,
        category_id: model.category_id,
        description: model.description,
        reference_number: model.reference_number,
        location: model.location,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let model = state
        .engine
        .create_transaction(engine::TransactionDraft {
            account_id: payload.account_id,
            kind: kind_to_engine(payload.transaction_type),
            amount_minor: payload.amount_minor,
            currency_code: payload.currency_code,
            transaction_date: payload.transaction_date,
            status: payload.status.map(status_to_engine),
            payee_id: payload.payee_id,
            category_id: payload.category_id,
            description: payload.description,
            reference_number: payload.reference_number,
            location: payload.location,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(model)?)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(transaction_id): Path<i32>,
) -> Result<Json<TransactionView>, ServerError> {
    let model = state.engine.transaction(transaction_id).await?;
    Ok(Json(view(model)?))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
    account_id: Option<i32>,
    transaction_type: Option<TransactionType>,
    status: Option<TransactionStatus>,
    category_id: Option<i32>,
    payee_id: Option<i32>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<TransactionView>>, ServerError> {
    let page = page_from(query.limit, query.offset, 50, 100)?;
    let filter = engine::TransactionFilter {
        account_id: query.account_id,
        kind: query.transaction_type.map(kind_to_engine),
        status: query.status.map(status_to_engine),
        category_id: query.category_id,
        payee_id: query.payee_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let (models, total) = state.engine.list_transactions(&filter, page).await?;

    Ok(Json(Paginated {
        data: models
            .into_iter()
            .map(view)
            .collect::<Result<Vec<_>, _>>()?,
        pagination: PageMeta {
            limit: page.limit,
            offset: page.offset,
            total,
        },
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(transaction_id): Path<i32>,
    Json(payload): Json<TransactionPatch>,
) -> Result<Json<TransactionView>, ServerError> {
    let model = state
        .engine
        .update_transaction(
            transaction_id,
            engine::TransactionPatch {
                account_id: payload.account_id,
                kind: payload.transaction_type.map(kind_to_engine),
                amount_minor: payload.amount_minor,
                currency_code: payload.currency_code,
                transaction_date: payload.transaction_date,
                status: payload.status.map(status_to_engine),
                payee_id: payload.payee_id,
                category_id: payload.category_id,
                description: payload.description,
                reference_number: payload.reference_number,
                location: payload.location,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(Json(view(model)?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(transaction_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
