//! Outbound mail handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use inboxlink_core::error_builder::not_found;
use inboxlink_core::problemdetails::{Problem, ProblemDetails};
use tracing::{error, warn};

use super::types::{
    gmail_problem, parse_data, AppState, SendMailBody, SendMailData, StatusResponse,
};
use crate::services::{diagnostic_params, DeliveryOutcome};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/integration/send", post(send_mail))
        .route("/integration/send-email", get(send_diagnostic_email))
}

fn log_outcome(outcome: &DeliveryOutcome, email: &str) {
    if let DeliveryOutcome::Failed(reason) = outcome {
        warn!("Mail from {} was accepted but not delivered: {}", email, reason);
    }
}

/// Compose and send a message as the account owning `email`
///
/// Delivery is best effort: once the account is found the answer is
/// `success` even when Gmail rejected the message.
#[utoipa::path(
    tag = "Mail",
    post,
    path = "/integration/send",
    request_body = SendMailBody,
    responses(
        (status = 200, description = "Message accepted", body = StatusResponse),
        (status = 400, description = "Malformed data payload", body = ProblemDetails),
        (status = 404, description = "No account for the sender mailbox", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
pub async fn send_mail(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMailBody>,
) -> Result<impl IntoResponse, Problem> {
    let data: SendMailData = parse_data(body.data).map_err(|e| gmail_problem(&e))?;

    let outcome = state
        .delivery_service
        .send_from_account(&data.email, &data.mail_params)
        .await
        .map_err(|e| {
            error!("Failed to send mail: {}", e);
            gmail_problem(&e)
        })?;
    log_outcome(&outcome, &data.email);

    Ok(Json(StatusResponse::new("success")))
}

/// Send a fixed test message from the diagnostic mailbox to itself
#[utoipa::path(
    tag = "Mail",
    get,
    path = "/integration/send-email",
    responses(
        (status = 200, description = "Diagnostic message accepted", body = String),
        (
            status = 404,
            description = "Diagnostic mailbox not configured or unknown",
            body = ProblemDetails
        )
    )
)]
pub async fn send_diagnostic_email(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, Problem> {
    let email = state.diagnostic_email.as_deref().ok_or_else(|| {
        not_found()
            .detail("No diagnostic mailbox is configured")
            .build()
    })?;

    let outcome = state
        .delivery_service
        .send_from_account(email, &diagnostic_params(email))
        .await
        .map_err(|e| gmail_problem(&e))?;
    log_outcome(&outcome, email);

    Ok(Json("success"))
}
