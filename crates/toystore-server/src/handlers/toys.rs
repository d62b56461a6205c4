//! Toy handlers
//!
//! Responses carry the bare entity or array; errors are status-only.

use super::parse_index;
use crate::extractors::Payload;
use crate::models::Toy;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Json<Vec<Toy>> {
    Json(state.store.toys())
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Toy>, StatusCode> {
    let index = parse_index(&id)?;
    state.store.toy(index).map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<Json<Toy>, StatusCode> {
    match state.store.create_toy(&body) {
        Ok(toy) => Ok(Json(toy)),
        Err(err) => {
            tracing::debug!("rejected toy creation: {err}");
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(body): Payload,
) -> Result<Json<Toy>, StatusCode> {
    let index = parse_index(&id)?;
    state
        .store
        .update_toy(index, &body)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Toy>, StatusCode> {
    let index = parse_index(&id)?;
    state
        .store
        .delete_toy(index)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_all(State(state): State<AppState>) -> Json<Vec<Toy>> {
    Json(state.store.clear_toys())
}
