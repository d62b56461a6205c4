//! Body extractor for the resource routes.
//!
//! Flattens a request body into a key-value map the way the resource
//! handlers expect: a JSON object keeps its values as-is, a urlencoded form
//! yields string values (so a form field `price=0` is the non-empty, truthy
//! string `"0"`). A missing body or unrecognized content type is an empty
//! map; a body that claims a format but fails to parse rejects with 400.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde_json::{Map, Value};

/// Flat key-value mapping of the request body.
#[derive(Debug, Clone, Default)]
pub struct Payload(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_owned();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?;
            match value {
                Value::Object(map) => Ok(Payload(map)),
                _ => Err(StatusCode::BAD_REQUEST),
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?;
            let mut map = Map::new();
            for (key, value) in fields {
                map.insert(key, Value::String(value));
            }
            Ok(Payload(map))
        } else {
            Ok(Payload(Map::new()))
        }
    }
}
