//! HTTP handlers for the Gmail integration

mod integrations;
mod send;
mod types;

pub use types::{gmail_problem, AppState, StatusResponse};

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

/// Configure Gmail integration routes
pub fn configure_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(integrations::routes())
        .merge(send::routes())
        .route("/health", get(health))
        .route("/openapi.json", get(openapi))
}

/// Liveness check
#[utoipa::path(
    tag = "Service",
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = StatusResponse))
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::new("ok"))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(GmailApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Integrations
        integrations::create_integration,
        integrations::get_email,
        // Mail
        send::send_mail,
        send::send_diagnostic_email,
        // Service
        health,
    ),
    components(
        schemas(
            types::CreateIntegrationBody,
            types::SendMailBody,
            types::SendMailData,
            types::StatusResponse,
            inboxlink_core::ProblemDetails,
            crate::mime::MailParams,
            crate::mime::Attachment,
            crate::providers::GmailMessage,
        )
    ),
    tags(
        (name = "Integrations", description = "Gmail integration setup"),
        (name = "Mail", description = "Outbound mail through Gmail"),
        (name = "Service", description = "Operational endpoints")
    )
)]
pub struct GmailApiDoc;
