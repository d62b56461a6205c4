//! HTTP handlers

pub mod categories;
pub mod health;
pub mod toys;

pub use health::health;

use axum::http::StatusCode;

/// Path ids address elements by position. Anything that does not parse as
/// an index behaves like an out-of-bounds lookup.
fn parse_index(raw: &str) -> Result<usize, StatusCode> {
    raw.parse::<usize>().map_err(|_| StatusCode::NOT_FOUND)
}
