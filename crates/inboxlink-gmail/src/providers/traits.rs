//! Gmail provider trait definitions

use async_trait::async_trait;
use inboxlink_core::{from_epoch_millis, parse_epoch_millis, DBDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::credentials::Credentials;
use crate::errors::GmailError;

/// Gmail message resource
///
/// Gmail uses the same resource for the metadata part of an upload (where
/// only `threadId` matters) and for the response describing the sent message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GmailMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "18c2f0b1a2b3c4d5")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "18c2f0b1a2b3c4d5")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
}

impl GmailMessage {
    /// Upload metadata placing the message into an existing conversation
    pub fn in_thread(thread_id: Option<&str>) -> Self {
        Self {
            thread_id: thread_id.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Normalised result of a `users.watch` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchResponse {
    /// Mailbox history cursor at the time the subscription started
    pub history_id: String,
    /// When the subscription lapses and must be renewed
    pub expiration: Option<DBDateTime>,
}

impl WatchResponse {
    /// Accepts both `{historyId, expiration}` and `{data: {historyId, expiration}}`
    pub fn from_json(value: &Value) -> Result<Self, GmailError> {
        let body = match value.get("data") {
            Some(nested) if nested.is_object() => nested,
            _ => value,
        };

        let history_id = body
            .get("historyId")
            .and_then(scalar_string)
            .ok_or_else(|| {
                GmailError::InvalidResponse("watch response has no historyId".to_string())
            })?;

        let expiration = match body.get("expiration") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(parse_expiration(raw).ok_or_else(|| {
                GmailError::InvalidResponse(format!("invalid watch expiration: {raw}"))
            })?),
        };

        Ok(Self {
            history_id,
            expiration,
        })
    }
}

/// Google encodes int64 fields as strings, but older clients passed numbers through
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_expiration(value: &Value) -> Option<DBDateTime> {
    match value {
        Value::String(s) => parse_epoch_millis(s),
        Value::Number(n) => n.as_i64().and_then(from_epoch_millis),
        _ => None,
    }
}

/// Gmail REST operations used by this service
#[async_trait]
pub trait GmailApi: Send + Sync {
    /// Subscribe the mailbox to push notifications on the configured topic
    async fn watch(
        &self,
        account_id: &str,
        credentials: &Credentials,
    ) -> Result<WatchResponse, GmailError>;

    /// Upload a raw RFC 2822 message for sending, optionally threaded
    async fn send_raw(
        &self,
        credentials: &Credentials,
        message: &str,
        thread_id: Option<&str>,
    ) -> Result<GmailMessage, GmailError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_watch_response_flat_shape() {
        let response = WatchResponse::from_json(&json!({
            "historyId": "123456",
            "expiration": "1700000000000"
        }))
        .unwrap();

        assert_eq!(response.history_id, "123456");
        assert_eq!(
            response.expiration.unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_watch_response_nested_shape_with_numbers() {
        let response = WatchResponse::from_json(&json!({
            "data": { "historyId": 98765, "expiration": 1700000000000i64 }
        }))
        .unwrap();

        assert_eq!(response.history_id, "98765");
        assert!(response.expiration.is_some());
    }

    #[test]
    fn test_watch_response_without_expiration() {
        let response = WatchResponse::from_json(&json!({ "historyId": "1" })).unwrap();
        assert_eq!(response.expiration, None);
    }

    #[test]
    fn test_watch_response_requires_history_id() {
        let result = WatchResponse::from_json(&json!({ "data": { "expiration": "1" } }));
        assert!(matches!(result, Err(GmailError::InvalidResponse(_))));

        let result = WatchResponse::from_json(&json!({ "historyId": "" }));
        assert!(matches!(result, Err(GmailError::InvalidResponse(_))));
    }

    #[test]
    fn test_watch_response_rejects_bad_expiration() {
        let result = WatchResponse::from_json(&json!({
            "historyId": "1",
            "expiration": "tomorrow"
        }));
        assert!(matches!(result, Err(GmailError::InvalidResponse(_))));
    }

    #[test]
    fn test_gmail_message_metadata_serialization() {
        let metadata = serde_json::to_value(GmailMessage::in_thread(Some("t-1"))).unwrap();
        assert_eq!(metadata, json!({ "threadId": "t-1" }));

        let metadata = serde_json::to_value(GmailMessage::in_thread(None)).unwrap();
        assert_eq!(metadata, json!({}));
    }

    #[test]
    fn test_gmail_message_from_response() {
        let message: GmailMessage = serde_json::from_value(json!({
            "id": "m-1",
            "threadId": "t-1",
            "labelIds": ["SENT"]
        }))
        .unwrap();

        assert_eq!(message.id.as_deref(), Some("m-1"));
        assert_eq!(message.thread_id.as_deref(), Some("t-1"));
        assert_eq!(message.label_ids, vec!["SENT"]);
    }
}
