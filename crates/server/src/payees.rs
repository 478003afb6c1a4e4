//! Payees API endpoints

use api_types::page::{PageMeta, Paginated};
use api_types::payee::{PayeeNew, PayeePatch, PayeeView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{ServerError, page_from, server::ServerState};

fn view(model: engine::payees::Model) -> PayeeView {
    PayeeView {
        payee_id: model.payee_id,
        payee_name: model.payee_name,
        default_category_id: model.default_category_id,
        notes: model.notes,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PayeeNew>,
) -> Result<(StatusCode, Json<PayeeView>), ServerError> {
    let model = state
        .engine
        .create_payee(engine::PayeeDraft {
            payee_name: payload.payee_name,
            default_category_id: payload.default_category_id,
            notes: payload.notes,
            is_active: payload.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(model))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(payee_id): Path<i32>,
) -> Result<Json<PayeeView>, ServerError> {
    let model = state.engine.payee(payee_id).await?;
    Ok(Json(view(model)))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
    is_active: Option<bool>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<PayeeView>>, ServerError> {
    let page = page_from(query.limit, query.offset, 100, 200)?;
    let filter = engine::PayeeFilter {
        is_active: query.is_active,
    };

    let (models, total) = state.engine.list_payees(&filter, page).await?;

    Ok(Json(Paginated {
        data: models.into_iter().map(view).collect(),
        pagination: PageMeta {
            limit: page.limit,
            offset: page.offset,
            total,
        },
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(payee_id): Path<i32>,
    Json(payload): Json<PayeePatch>,
) -> Result<Json<PayeeView>, ServerError> {
    let model = state
        .engine
        .update_payee(
            payee_id,
            engine::PayeePatch {
                payee_name: payload.payee_name,
                default_category_id: payload.default_category_id,
                notes: payload.notes,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(view(model)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(payee_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_payee(payee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
