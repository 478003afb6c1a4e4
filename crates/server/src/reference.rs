//! Read-only reference endpoints: account types and currencies.

use api_types::reference::{AccountTypeView, CurrencyView};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

pub async fn account_types(
    State(state): State<ServerState>,
) -> Result<Json<Vec<AccountTypeView>>, ServerError> {
    let models = state.engine.account_types().await?;
    Ok(Json(
        models
            .into_iter()
            .map(|model| AccountTypeView {
                account_type_id: model.account_type_id,
                type_name: model.type_name,
                description: model.description,
                is_asset: model.is_asset,
            })
            .collect(),
    ))
}

fn default_active_only() -> bool {
    true
}

/// Inactive currencies are hidden unless explicitly requested.
#[derive(Debug, Deserialize)]
pub struct CurrencyQuery {
    #[serde(default = "default_active_only")]
    active_only: bool,
}

pub async fn currencies(
    State(state): State<ServerState>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<Vec<CurrencyView>>, ServerError> {
    let models = state.engine.currencies(query.active_only).await?;
    Ok(Json(
        models
            .into_iter()
            .map(|model| CurrencyView {
                currency_code: model.currency_code,
                currency_name: model.currency_name,
                currency_symbol: model.currency_symbol,
                decimal_places: model.decimal_places,
                is_active: model.is_active,
            })
            .collect(),
    ))
}
