//! Gmail REST API client
//!
//! Talks to `users.watch` and the multipart upload variant of
//! `users.messages.send`, always on behalf of the authenticated user (`me`).

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::traits::{GmailApi, GmailMessage, WatchResponse};
use crate::config::GmailConfig;
use crate::credentials::Credentials;
use crate::errors::GmailError;

const WATCH_PATH: &str = "/gmail/v1/users/me/watch";
const UPLOAD_SEND_PATH: &str = "/upload/gmail/v1/users/me/messages/send";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchRequest<'a> {
    topic_name: String,
    label_ids: &'a [String],
}

/// Gmail provider backed by Google's REST endpoints
#[derive(Debug, Clone)]
pub struct GoogleGmailClient {
    client: Client,
    base_url: String,
    topic_name: String,
    label_ids: Vec<String>,
}

impl GoogleGmailClient {
    pub fn new(config: &GmailConfig) -> Result<Self, GmailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GmailError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            topic_name: config.topic_name(),
            label_ids: config.label_ids.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, GmailError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GmailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }

        serde_json::from_str(&text).map_err(|e| {
            GmailError::InvalidResponse(format!("Failed to parse response: {} - Body: {}", e, text))
        })
    }
}

/// Builds the `multipart/related` upload body: JSON metadata, then the raw message
fn multipart_related_body(
    boundary: &str,
    metadata: &GmailMessage,
    message: &str,
) -> Result<String, GmailError> {
    let metadata = serde_json::to_string(metadata)?;
    Ok(format!(
        "--{boundary}\r\n\
         Content-Type: application/json; charset=UTF-8\r\n\r\n\
         {metadata}\r\n\
         --{boundary}\r\n\
         Content-Type: message/rfc822\r\n\r\n\
         {message}\r\n\
         --{boundary}--\r\n"
    ))
}

#[async_trait]
impl GmailApi for GoogleGmailClient {
    async fn watch(
        &self,
        account_id: &str,
        credentials: &Credentials,
    ) -> Result<WatchResponse, GmailError> {
        debug!(
            "Starting Gmail watch for account {} on {}",
            account_id, self.topic_name
        );

        let body = WatchRequest {
            topic_name: self.topic_name.clone(),
            label_ids: &self.label_ids,
        };
        let request = self
            .client
            .post(self.url(WATCH_PATH))
            .bearer_auth(credentials.bearer_token())
            .json(&body);

        let response = self.execute(request).await?;
        WatchResponse::from_json(&response)
    }

    async fn send_raw(
        &self,
        credentials: &Credentials,
        message: &str,
        thread_id: Option<&str>,
    ) -> Result<GmailMessage, GmailError> {
        let boundary = format!("inboxlink_upload_{}", Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, &GmailMessage::in_thread(thread_id), message)?;

        debug!(
            "Uploading message ({} bytes, thread {:?})",
            message.len(),
            thread_id
        );

        let request = self
            .client
            .post(self.url(UPLOAD_SEND_PATH))
            .query(&[("uploadType", "multipart")])
            .bearer_auth(credentials.bearer_token())
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body);

        let response = self.execute(request).await?;
        serde_json::from_value(response)
            .map_err(|e| GmailError::InvalidResponse(format!("Unexpected send response: {}", e)))
    }
}
