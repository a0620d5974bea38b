//! Transactions API endpoints - JSON API
//!
//! Endpoints:
//! - api_transactions: Filtered, sorted transaction list (JSON)
//! - api_summary: Totals for the same filtered set (JSON)

use crate::{ApiError, AppState};
use axum::extract::Query;
use axum::Json;
use paydash_core::{query_transactions, Transaction, TransactionQuery, TransactionSummary, TransactionsResponse};
use std::collections::HashMap;

/// Parse the request parameters and run the pipeline against the state's source
pub fn run_query(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<(TransactionQuery, Vec<Transaction>), ApiError> {
    let query = TransactionQuery::from_params_with_default(params, state.default_sort).map_err(|e| {
        log::warn!("Rejected transaction query {:?}: {}", params, e);
        ApiError::from(e)
    })?;

    let items = query_transactions(state.source.as_ref(), &query);
    Ok((query, items))
}

/// Get transactions with search, filters and sort (JSON API)
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let (_, items) = run_query(&state, &params)?;
    Ok(Json(TransactionsResponse { items }))
}

/// Get totals for the filtered transactions (JSON API)
pub async fn api_summary(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<TransactionSummary>, ApiError> {
    let (_, items) = run_query(&state, &params)?;
    Ok(Json(TransactionSummary::from_transactions(&items)))
}
