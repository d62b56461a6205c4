//! Category handlers, including the toys-by-category cross query.

use super::parse_index;
use crate::extractors::Payload;
use crate::models::{Category, Toy};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.categories())
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, StatusCode> {
    let index = parse_index(&id)?;
    state
        .store
        .category(index)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// GET /categories/:id/toys, where `:id` is the category *name*, matched by
/// string equality against the category sequence.
pub async fn toys(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Toy>>, StatusCode> {
    state
        .store
        .toys_in_category(&name)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<Json<Category>, StatusCode> {
    match state.store.create_category(&body) {
        Ok(category) => Ok(Json(category)),
        Err(err) => {
            tracing::debug!("rejected category creation: {err}");
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(body): Payload,
) -> Result<Json<Category>, StatusCode> {
    let index = parse_index(&id)?;
    state
        .store
        .update_category(index, &body)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, StatusCode> {
    let index = parse_index(&id)?;
    state
        .store
        .delete_category(index)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_all(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.clear_categories())
}
