//! RFC 7807 problem responses
//!
//! [`Problem`] is what handlers return on failure; [`ProblemDetails`] only
//! describes its body in the OpenAPI document.

use std::collections::BTreeMap;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Body of every error response, as produced by the error builders
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "type": "https://inboxlink.dev/probs/not-found",
    "title": "Resource Not Found",
    "detail": "Account not found with id 64f0c2",
    "instance": "/error/not-found",
    "error_code": "NOT_FOUND",
    "timestamp": "2025-03-01T12:00:00+00:00"
}))]
pub struct ProblemDetails {
    /// URI identifying the problem type
    #[serde(rename = "type")]
    #[schema(example = "https://inboxlink.dev/probs/not-found")]
    pub type_url: String,
    #[schema(example = "Resource Not Found")]
    pub title: String,
    /// Explanation of this occurrence
    #[schema(example = "Account not found with id 64f0c2")]
    pub detail: String,
    #[schema(example = "/error/not-found")]
    pub instance: String,
    /// Machine readable code; absent on 400 responses
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "NOT_FOUND")]
    pub error_code: Option<String>,
    /// RFC 3339 time the error was produced
    pub timestamp: String,
}

/// Error response: a status code plus a JSON object body
#[derive(Debug, Clone)]
pub struct Problem {
    pub status_code: StatusCode,
    pub body: BTreeMap<String, Value>,
}

impl Problem {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: BTreeMap::new(),
        }
    }

    /// Set one member of the body, replacing any previous value
    pub fn with_value<V>(mut self, key: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.body.insert(key.to_owned(), value.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        if self.body.is_empty() {
            return self.status_code.into_response();
        }

        let mut response = (self.status_code, Json(self.body)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}
