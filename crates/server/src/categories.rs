//! Categories API endpoints

use api_types::category::{CategoryNew, CategoryPatch, CategoryType, CategoryView};
use api_types::page::{PageMeta, Paginated};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{ServerError, page_from, server::ServerState};

fn kind_to_engine(kind: CategoryType) -> engine::CategoryKind {
    match kind {
        CategoryType::Income => engine::CategoryKind::Income,
        CategoryType::Expense => engine::CategoryKind::Expense,
        CategoryType::Transfer => engine::CategoryKind::Transfer,
    }
}

fn kind_from_engine(kind: engine::CategoryKind) -> CategoryType {
    match kind {
        engine::CategoryKind::Income => CategoryType::Income,
        engine::CategoryKind::Expense => CategoryType::Expense,
        engine::CategoryKind::Transfer => CategoryType::Transfer,
    }
}

fn view(model: engine::categories::Model) -> Result<CategoryView, ServerError> {
    let kind = engine::CategoryKind::try_from(model.category_type.as_str())?;

    Ok(CategoryView {
        category_id: model.category_id,
        category_name: model.category_name,
        category_type: kind_from_engine(kind),
        category_group: model.category_group,
        color_code: model.color_code,
        icon_name: model.icon_name,
        is_active: model.is_active,
        created_at: model.created_at,
    })
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let model = state
        .engine
        .create_category(engine::CategoryDraft {
            category_name: payload.category_name,
            kind: kind_to_engine(payload.category_type),
            category_group: payload.category_group,
            color_code: payload.color_code,
            icon_name: payload.icon_name,
            is_active: payload.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(model)?)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(category_id): Path<i32>,
) -> Result<Json<CategoryView>, ServerError> {
    let model = state.engine.category(category_id).await?;
    Ok(Json(view(model)?))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
    category_type: Option<CategoryType>,
    category_group: Option<String>,
    is_active: Option<bool>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<CategoryView>>, ServerError> {
    let page = page_from(query.limit, query.offset, 100, 200)?;
    let filter = engine::CategoryFilter {
        kind: query.category_type.map(kind_to_engine),
        category_group: query.category_group,
        is_active: query.is_active,
    };

    let (models, total) = state.engine.list_categories(&filter, page).await?;

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
    Path(category_id): Path<i32>,
    Json(payload): Json<CategoryPatch>,
) -> Result<Json<CategoryView>, ServerError> {
    let model = state
        .engine
        .update_category(
            category_id,
            engine::CategoryPatch {
                category_name: payload.category_name,
                kind: payload.category_type.map(kind_to_engine),
                category_group: payload.category_group,
                color_code: payload.color_code,
                icon_name: payload.icon_name,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(view(model)?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(category_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
