//! Expenses API endpoints.

use api_types::expense::{ExpenseGet, ExpenseNew, ExpenseUpdate};
use axum::{Json, extract::State, http::StatusCode};
use engine::ExpenseWriteCmd;

use crate::{
    ServerError,
    extract::{JsonBody, PathId},
    server::ServerState,
};

fn map_expense(expense: engine::expenses::Model) -> ExpenseGet {
    ExpenseGet {
        id: expense.id,
        amount: engine::Money::new(expense.amount_minor).into(),
        date: expense.date,
        category: expense.category,
        notes: expense.notes,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ExpenseGet>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(expenses))
}

pub async fn get(
    State(state): State<ServerState>,
    PathId(id): PathId,
) -> Result<Json<ExpenseGet>, ServerError> {
    let expense = state.engine.expense(id).await?;
    Ok(Json(map_expense(expense)))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseGet>), ServerError> {
    let expense = state
        .engine
        .create_expense(ExpenseWriteCmd {
            amount: payload.amount,
            date: payload.date,
            category: payload.category,
            notes: payload.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<ExpenseUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_expense(
            id,
            ExpenseWriteCmd {
                amount: payload.amount,
                date: payload.date,
                category: payload.category,
                notes: payload.notes,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<ServerState>,
    PathId(id): PathId,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
