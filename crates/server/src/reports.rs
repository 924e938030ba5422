//! Reports API endpoints.

use api_types::report::{CategorySummary, Summary};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn summary(State(state): State<ServerState>) -> Result<Json<Summary>, ServerError> {
    let totals = state.engine.summary().await?;
    Ok(Json(Summary {
        total_expenses: totals.total_expenses.into(),
        monthly_expenses: totals.monthly_expenses.into(),
        category_count: totals.category_count,
    }))
}

pub async fn category_summary(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategorySummary>>, ServerError> {
    let rows = state
        .engine
        .category_summary()
        .await?
        .into_iter()
        .map(|row| CategorySummary {
            category: row.category,
            total: row.total.into(),
            count: row.count,
        })
        .collect();

    Ok(Json(rows))
}
