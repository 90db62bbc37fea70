//! Integration setup handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use inboxlink_core::problemdetails::{Problem, ProblemDetails};
use tracing::{error, warn};

use super::types::{
    gmail_problem, parse_data, AppState, CreateIntegrationBody, CreateIntegrationData,
    GetEmailQuery, StatusResponse,
};
use crate::services::{CreateIntegrationRequest, SubscriptionOutcome};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/integration/create", post(create_integration))
        .route("/integration/get-email", get(get_email))
}

/// Create a Gmail integration and subscribe the mailbox to push notifications
///
/// Answers `ok` once the integration is stored, including when the
/// subscription could not be started; the record then carries status `failed`.
#[utoipa::path(
    tag = "Integrations",
    post,
    path = "/integration/create",
    request_body = CreateIntegrationBody,
    responses(
        (status = 200, description = "Integration stored", body = StatusResponse),
        (status = 400, description = "Malformed data payload", body = ProblemDetails),
        (status = 404, description = "Account not found", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
pub async fn create_integration(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateIntegrationBody>,
) -> Result<impl IntoResponse, Problem> {
    let data: CreateIntegrationData = parse_data(body.data).map_err(|e| gmail_problem(&e))?;

    let request = CreateIntegrationRequest {
        account_id: body.account_id,
        integration_id: body.integration_id,
        email: data.email,
    };

    let setup = state
        .integration_service
        .create(request)
        .await
        .map_err(|e| {
            error!("Failed to create integration: {}", e);
            gmail_problem(&e)
        })?;

    if let SubscriptionOutcome::Failed(reason) = &setup.subscription {
        warn!(
            "Integration {} stored without push subscription: {}",
            setup.integration.id, reason
        );
    }

    Ok(Json(StatusResponse::new("ok")))
}

/// Mailbox address of an account, as a bare JSON string
#[utoipa::path(
    tag = "Integrations",
    get,
    path = "/integration/get-email",
    params(GetEmailQuery),
    responses(
        (status = 200, description = "Mailbox address", body = String),
        (status = 404, description = "Account not found", body = ProblemDetails)
    )
)]
pub async fn get_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetEmailQuery>,
) -> Result<impl IntoResponse, Problem> {
    let email = state
        .integration_service
        .get_email(&query.account_id)
        .await
        .map_err(|e| gmail_problem(&e))?;

    Ok(Json(email))
}
