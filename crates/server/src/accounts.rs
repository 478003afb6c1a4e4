//! Accounts API endpoints

use api_types::account::{AccountNew, AccountPatch, AccountView};
use api_types::page::{PageMeta, Paginated};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{ServerError, page_from, server::ServerState};

fn view(model: engine::accounts::Model) -> AccountView {
    AccountView {
        account_id: model.account_id,
        account_type_id: model.account_type_id,
        account_name: model.account_name,
        account_number: model.account_number,
        institution_name: model.institution_name,
        currency_code: model.currency_code,
        opening_balance_minor: model.opening_balance_minor,
        current_balance_minor: model.current_balance_minor,
        credit_limit_minor: model.credit_limit_minor,
        is_closed: model.is_closed,
        notes: model.notes,
        opening_balance_date: model.opening_balance_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let model = state
        .engine
        .create_account(engine::AccountDraft {
            account_type_id: payload.account_type_id,
            account_name: payload.account_name,
            currency_code: payload.currency_code,
            opening_balance_minor: payload.opening_balance_minor,
            opening_balance_date: payload.opening_balance_date,
            account_number: payload.account_number,
            institution_name: payload.institution_name,
            credit_limit_minor: payload.credit_limit_minor,
            is_closed: payload.is_closed,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(model))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(account_id): Path<i32>,
) -> Result<Json<AccountView>, ServerError> {
    let model = state.engine.account(account_id).await?;
    Ok(Json(view(model)))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
    account_type_id: Option<i32>,
    currency_code: Option<String>,
    is_closed: Option<bool>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<AccountView>>, ServerError> {
    let page = page_from(query.limit, query.offset, 50, 100)?;
    let filter = engine::AccountFilter {
        account_type_id: query.account_type_id,
        currency_code: query.currency_code,
        is_closed: query.is_closed,
    };

    let (models, total) = state.engine.list_accounts(&filter, page).await?;

    Ok(Json(Paginated {
        data: models.into_iter().map(view).collect(),
        pagination: PageMeta {
            limit: page.limit,
            offset: page.offset,
            total,
        },
    }))
}

/// Serves both PUT and PATCH: a full update still only touches the
/// provided fields.
pub async fn update(
    State(state): State<ServerState>,
    Path(account_id): Path<i32>,
    Json(payload): Json<AccountPatch>,
) -> Result<Json<AccountView>, ServerError> {
    let model = state
        .engine
        .update_account(
            account_id,
            engine::AccountPatch {
                account_type_id: payload.account_type_id,
                account_name: payload.account_name,
                currency_code: payload.currency_code,
                account_number: payload.account_number,
                institution_name: payload.institution_name,
                credit_limit_minor: payload.credit_limit_minor,
                is_closed: payload.is_closed,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(Json(view(model)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(account_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_account(account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
