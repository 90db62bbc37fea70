//! Gmail provider configuration

use serde::{Deserialize, Serialize};

use crate::errors::GmailError;

pub const DEFAULT_API_BASE_URL: &str = "https://gmail.googleapis.com";

fn default_label_ids() -> Vec<String> {
    vec!["INBOX".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GmailConfig {
    /// Root of the Gmail REST API (overridable for tests and proxies)
    pub api_base_url: String,
    /// Google Cloud project owning the Pub/Sub topic
    pub project_id: String,
    /// Pub/Sub topic receiving mailbox change notifications
    pub topic: String,
    #[serde(default = "default_label_ids")]
    pub label_ids: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Mailbox used by the diagnostic send route; the route is disabled when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_email: Option<String>,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            project_id: String::new(),
            topic: String::new(),
            label_ids: default_label_ids(),
            timeout_secs: default_timeout_secs(),
            diagnostic_email: None,
        }
    }
}

impl GmailConfig {
    /// Fully qualified Pub/Sub topic name expected by `users.watch`
    pub fn topic_name(&self) -> String {
        format!("projects/{}/topics/{}", self.project_id, self.topic)
    }

    pub fn validate(&self) -> Result<(), GmailError> {
        if self.project_id.trim().is_empty() {
            return Err(GmailError::Configuration(
                "Google project id is required".to_string(),
            ));
        }
        if self.topic.trim().is_empty() {
            return Err(GmailError::Configuration(
                "Gmail Pub/Sub topic is required".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(GmailError::Configuration(
                "HTTP timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> GmailConfig {
        GmailConfig {
            project_id: "acme-mail".to_string(),
            topic: "gmail-push".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_topic_name() {
        assert_eq!(
            configured().topic_name(),
            "projects/acme-mail/topics/gmail-push"
        );
    }

    #[test]
    fn test_validate() {
        assert!(configured().validate().is_ok());
        assert!(GmailConfig::default().validate().is_err());

        let config = GmailConfig {
            timeout_secs: 0,
            ..configured()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: GmailConfig = serde_json::from_str(
            r#"{"api_base_url":"http://localhost:9000","project_id":"p","topic":"t"}"#,
        )
        .unwrap();

        assert_eq!(config.label_ids, vec!["INBOX"]);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.diagnostic_email, None);
    }
}
