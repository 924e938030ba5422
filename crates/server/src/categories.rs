//! Categories API endpoints.

use api_types::category::{CategoryGet, CategoryNew, CategoryUpdate};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::{JsonBody, PathId},
    server::ServerState,
};

fn map_category(category: engine::categories::Model) -> CategoryGet {
    CategoryGet {
        id: category.id,
        name: category.name,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CategoryGet>>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(categories))
}

pub async fn get(
    State(state): State<ServerState>,
    PathId(id): PathId,
) -> Result<Json<CategoryGet>, ServerError> {
    let category = state.engine.category(id).await?;
    Ok(Json(map_category(category)))
}

pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryGet>), ServerError> {
    let category = state.engine.create_category(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    State(state): State<ServerState>,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<CategoryUpdate>,
) -> Result<StatusCode, ServerError> {
    state.engine.rename_category(id, &payload.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<ServerState>,
    PathId(id): PathId,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
