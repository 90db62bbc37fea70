//! Handler types for the Gmail integration

use inboxlink_core::error_builder::{bad_gateway, bad_request, internal_server_error, not_found};
use inboxlink_core::problemdetails::Problem;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::errors::GmailError;
use crate::mime::MailParams;
use crate::services::{DeliveryService, IntegrationService};

/// Application state for Gmail handlers
pub struct AppState {
    pub integration_service: Arc<IntegrationService>,
    pub delivery_service: Arc<DeliveryService>,
    /// Mailbox used by `GET /integration/send-email`
    pub diagnostic_email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegrationBody {
    #[schema(example = "acc-1")]
    pub account_id: String,
    /// Identifier of the integration in the calling system
    #[schema(example = "5f1c2d3e4a")]
    pub integration_id: String,
    /// JSON document (usually string-encoded) carrying `{ "email": ... }`
    #[schema(value_type = String, example = "{\"email\":\"owner@example.com\"}")]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntegrationData {
    pub email: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetEmailQuery {
    pub account_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMailBody {
    /// JSON document (usually string-encoded) carrying [`SendMailData`]
    #[schema(value_type = String)]
    pub data: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMailData {
    pub mail_params: MailParams,
    /// Mailbox of the sending account
    #[schema(example = "owner@example.com")]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "ok")]
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Decode a `data` field sent either as a JSON string or as an inline object
pub fn parse_data<T: DeserializeOwned>(data: Value) -> Result<T, GmailError> {
    match data {
        Value::String(encoded) => Ok(serde_json::from_str(&encoded)?),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Map a service error onto its problem response
pub fn gmail_problem(error: &GmailError) -> Problem {
    match error {
        GmailError::AccountNotFound(_) => not_found().detail(error.to_string()).build(),
        GmailError::InvalidPayload(message) => bad_request().detail(message.clone()).build(),
        GmailError::Api { .. } | GmailError::Http(_) | GmailError::InvalidResponse(_) => {
            bad_gateway().detail(error.to_string()).build()
        }
        GmailError::Database(_)
        | GmailError::MissingCredentials(_)
        | GmailError::Configuration(_) => internal_server_error().build(),
    }
}
