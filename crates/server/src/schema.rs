//! Schema discovery endpoints over the engine's catalog subsystem.

use api_types::schema::{
    ColumnDef, ConstraintDef, DatabaseSchema, ReferenceData, Relationship, TableSchema,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::{ServerError, server::ServerState};

fn column_def(info: engine::ColumnInfo) -> ColumnDef {
    ColumnDef {
        column_name: info.name,
        data_type: info.data_type,
        is_nullable: info.is_nullable,
        column_default: info.column_default,
        character_maximum_length: info.character_maximum_length,
        numeric_precision: info.numeric_precision,
        numeric_scale: info.numeric_scale,
    }
}

fn constraint_def(info: engine::ConstraintInfo) -> ConstraintDef {
    ConstraintDef {
        constraint_name: info.name,
        constraint_type: info.kind,
        column_name: info.column,
        foreign_table_name: info.referenced_table,
        foreign_column_name: info.referenced_column,
    }
}

fn table_schema(info: engine::TableInfo) -> TableSchema {
    TableSchema {
        name: info.name,
        table_type: info.table_type,
        columns: info.columns.into_iter().map(column_def).collect(),
        constraints: info.constraints.into_iter().map(constraint_def).collect(),
    }
}

fn relationship(edge: engine::FkEdge) -> Relationship {
    Relationship {
        from_table: edge.from_table,
        from_column: edge.from_column,
        to_table: edge.to_table,
        to_column: edge.to_column,
        constraint_name: edge.constraint_name,
    }
}

pub async fn full(
    State(state): State<ServerState>,
) -> Result<Json<DatabaseSchema>, ServerError> {
    let snapshot = state.engine.schema_snapshot().await?;
    Ok(Json(DatabaseSchema {
        tables: snapshot.tables.into_iter().map(table_schema).collect(),
        relationships: snapshot
            .relationships
            .into_iter()
            .map(relationship)
            .collect(),
    }))
}

pub async fn tables(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ServerError> {
    let names = state.engine.table_names().await?;
    Ok(Json(names))
}

pub async fn table(
    State(state): State<ServerState>,
    Path(table_name): Path<String>,
) -> Result<Json<TableSchema>, ServerError> {
    let info = state
        .engine
        .table_schema(&table_name)
        .await?
        .ok_or(ServerError::TableNotFound(table_name))?;
    Ok(Json(table_schema(info)))
}

pub async fn relationships(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Relationship>>, ServerError> {
    let edges = state.engine.relationships().await?;
    Ok(Json(edges.into_iter().map(relationship).collect()))
}

fn currency_row(model: &engine::currencies::Model) -> serde_json::Value {
    json!({
        "currency_code": model.currency_code,
        "currency_name": model.currency_name,
        "currency_symbol": model.currency_symbol,
        "decimal_places": model.decimal_places,
        "is_active": model.is_active,
    })
}

fn account_type_row(model: &engine::account_types::Model) -> serde_json::Value {
    json!({
        "account_type_id": model.account_type_id,
        "type_name": model.type_name,
        "description": model.description,
        "is_asset": model.is_asset,
    })
}

fn category_row(model: &engine::categories::Model) -> serde_json::Value {
    json!({
        "category_id": model.category_id,
        "category_name": model.category_name,
        "category_group": model.category_group,
        "category_type": model.category_type,
        "color_code": model.color_code,
        "icon_name": model.icon_name,
        "is_active": model.is_active,
    })
}

const REFERENCE_TYPES: &[&str] = &["currencies", "account_types", "categories", "all"];

#[derive(Debug, Deserialize)]
pub struct ReferenceDataQuery {
    #[serde(rename = "type")]
    data_type: Option<String>,
}

/// Lookup-table contents by type. Only active currencies and
/// categories appear; account types are unconditional.
pub async fn reference_data(
    State(state): State<ServerState>,
    Query(query): Query<ReferenceDataQuery>,
) -> Result<Json<ReferenceData>, ServerError> {
    let Some(data_type) = query.data_type else {
        return Err(ServerError::InvalidParameter(
            "type parameter is required".to_string(),
        ));
    };
    if !REFERENCE_TYPES.contains(&data_type.as_str()) {
        return Err(ServerError::InvalidParameter(format!(
            "invalid type '{data_type}': must be one of currencies, account_types, categories, all"
        )));
    }

    let engine = &state.engine;
    let data = match data_type.as_str() {
        "currencies" => {
            json!(engine.currencies(true).await?.iter().map(currency_row).collect::<Vec<_>>())
        }
        "account_types" => json!(
            engine
                .account_types()
                .await?
                .iter()
                .map(account_type_row)
                .collect::<Vec<_>>()
        ),
        "categories" => json!(
            engine
                .active_categories()
                .await?
                .iter()
                .map(category_row)
                .collect::<Vec<_>>()
        ),
        _ => json!({
            "currencies": engine.currencies(true).await?.iter().map(currency_row).collect::<Vec<_>>(),
            "account_types": engine.account_types().await?.iter().map(account_type_row).collect::<Vec<_>>(),
            "categories": engine.active_categories().await?.iter().map(category_row).collect::<Vec<_>>(),
        }),
    };

    Ok(Json(ReferenceData { data_type, data }))
}
