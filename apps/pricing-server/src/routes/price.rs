use crate::auth::authenticate;
use crate::error::ServerError;
use crate::state::SharedState;

use models::{CardQuery, PriceResponse};
use pricing_engine::build_search_query;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use log::info;

/// POST /api/price
///
/// Body is a camelCase [`CardQuery`]. Brand, set name and year are required.
pub async fn price_card(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Json<CardQuery>, JsonRejection>,
) -> Result<Json<PriceResponse>, ServerError> {
    if state.require_auth {
        let claims = authenticate(&headers, &state.secret_key)?;
        info!("Price request from {}", claims.sub);
    }

    let Json(query) = body.map_err(|e| ServerError::bad_request(e.body_text()))?;
    query.validate()?;

    let search = build_search_query(&query);
    info!("Pricing '{search}' (condition '{}')", query.condition);

    let sold = state.market.search_sold(&search, &query.condition).await?;
    let active = state.market.search_active(&search).await?;

    Ok(Json(state.pricer.price(&query, sold, active)))
}
