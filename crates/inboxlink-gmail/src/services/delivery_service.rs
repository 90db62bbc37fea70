//! Outbound delivery through the Gmail API

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::credentials::{Credentials, CredentialsResolver};
use crate::errors::GmailError;
use crate::mime::{MailParams, MessageComposer};
use crate::providers::{GmailApi, GmailMessage};
use crate::services::AccountService;

/// What happened to a message handed to Gmail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent(GmailMessage),
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent(_))
    }

    /// Provider response on success, nothing on failure
    pub fn into_response(self) -> Option<GmailMessage> {
        match self {
            DeliveryOutcome::Sent(message) => Some(message),
            DeliveryOutcome::Failed(_) => None,
        }
    }
}

/// Fixed message the diagnostic route sends from a mailbox to itself
pub fn diagnostic_params(email: &str) -> MailParams {
    MailParams {
        from_email: email.to_string(),
        to_emails: email.to_string(),
        subject: "Inboxlink diagnostic message".to_string(),
        text_plain: "This message confirms that Inboxlink can send through Gmail.".to_string(),
        text_html: "<p>This message confirms that Inboxlink can send through Gmail.</p>"
            .to_string(),
        ..Default::default()
    }
}

pub struct DeliveryService {
    gmail: Arc<dyn GmailApi>,
    account_service: Arc<AccountService>,
    credentials: Arc<dyn CredentialsResolver>,
    composer: MessageComposer,
}

impl DeliveryService {
    pub fn new(
        gmail: Arc<dyn GmailApi>,
        account_service: Arc<AccountService>,
        credentials: Arc<dyn CredentialsResolver>,
    ) -> Self {
        Self {
            gmail,
            account_service,
            credentials,
            composer: MessageComposer::new(),
        }
    }

    pub fn with_composer(mut self, composer: MessageComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Hand a composed message to Gmail; failures are logged, never returned
    pub async fn deliver(
        &self,
        credentials: &Credentials,
        message: &str,
        thread_id: Option<&str>,
    ) -> DeliveryOutcome {
        match self.gmail.send_raw(credentials, message, thread_id).await {
            Ok(response) => {
                info!(
                    "Message delivered to Gmail (id {:?}, thread {:?})",
                    response.id, response.thread_id
                );
                DeliveryOutcome::Sent(response)
            }
            Err(e) => {
                error!("Failed to deliver message through Gmail: {}", e);
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }

    /// Compose `params` and deliver it, threaded when `thread_id` is set
    pub async fn send_mail(
        &self,
        credentials: &Credentials,
        params: &MailParams,
    ) -> DeliveryOutcome {
        let message = self.composer.compose(params);
        debug!(
            "Composed message from {} to {} ({} attachments)",
            params.from_email,
            params.to_emails,
            params.attachments.len()
        );
        self.deliver(credentials, &message, params.thread_id.as_deref())
            .await
    }

    /// Send `params` as the account whose mailbox is `email`
    ///
    /// A missing account is an error; anything after the lookup is reported
    /// through the outcome.
    pub async fn send_from_account(
        &self,
        email: &str,
        params: &MailParams,
    ) -> Result<DeliveryOutcome, GmailError> {
        let account = self.account_service.find_by_email(email).await?;

        let credentials = match self.credentials.resolve(&account).await {
            Ok(credentials) => credentials,
            Err(e) => {
                error!("Cannot send as {}: {}", email, e);
                return Ok(DeliveryOutcome::Failed(e.to_string()));
            }
        };

        Ok(self.send_mail(&credentials, params).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::AccountCredentialsResolver;
    use crate::mime::Attachment;
    use crate::providers::MockGmailApi;
    use crate::testing::insert_account;
    use inboxlink_database::test_utils::TestDatabase;

    fn service(db: &TestDatabase, gmail: MockGmailApi) -> DeliveryService {
        DeliveryService::new(
            Arc::new(gmail),
            Arc::new(AccountService::new(db.connection_arc())),
            Arc::new(AccountCredentialsResolver::new()),
        )
        .with_composer(MessageComposer::with_boundary("__delivery_test__"))
    }

    fn params() -> MailParams {
        MailParams {
            from_email: "owner@example.com".to_string(),
            to_emails: "friend@example.com".to_string(),
            subject: "Hello".to_string(),
            text_plain: "Hi".to_string(),
            text_html: "<p>Hi</p>".to_string(),
            attachments: vec![Attachment {
                mime_type: "text/plain".to_string(),
                filename: "notes.txt".to_string(),
                data: b"notes".to_vec(),
            }],
            thread_id: Some("thread-7".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_send_from_account_delivers_composed_message() {
        let db = TestDatabase::with_migrations().await.unwrap();
        insert_account(db.connection(), "acc-1", "owner@example.com", Some("token-1")).await;
        let gmail = MockGmailApi::new();
        let service = service(&db, gmail.clone());

        let outcome = service
            .send_from_account("owner@example.com", &params())
            .await
            .unwrap();

        assert!(outcome.is_sent());
        let response = outcome.into_response().unwrap();
        assert_eq!(response.thread_id.as_deref(), Some("thread-7"));

        let sent = gmail.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer_token, "token-1");
        assert_eq!(sent[0].thread_id.as_deref(), Some("thread-7"));
        assert!(sent[0].message.contains("boundary=\"__delivery_test__\""));
        assert!(sent[0].message.contains("filename=\"notes.txt\""));
    }

    #[tokio::test]
    async fn test_send_failure_is_reported_not_raised() {
        let db = TestDatabase::with_migrations().await.unwrap();
        insert_account(db.connection(), "acc-1", "owner@example.com", Some("token-1")).await;
        let gmail = MockGmailApi::new().with_send_failure();
        let service = service(&db, gmail.clone());

        let outcome = service
            .send_from_account("owner@example.com", &params())
            .await
            .unwrap();

        assert_eq!(gmail.send_call_count(), 1);
        assert!(matches!(
            &outcome,
            DeliveryOutcome::Failed(reason) if reason.contains("Mock send failure")
        ));
        assert_eq!(outcome.into_response(), None);
    }

    #[tokio::test]
    async fn test_send_from_unknown_account_fails() {
        let db = TestDatabase::with_migrations().await.unwrap();
        let gmail = MockGmailApi::new();
        let service = service(&db, gmail.clone());

        let result = service
            .send_from_account("nobody@example.com", &params())
            .await;

        assert!(matches!(result, Err(GmailError::AccountNotFound(_))));
        assert_eq!(gmail.send_call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_without_token_is_failed_delivery() {
        let db = TestDatabase::with_migrations().await.unwrap();
        insert_account(db.connection(), "acc-1", "owner@example.com", None).await;
        let gmail = MockGmailApi::new();
        let service = service(&db, gmail.clone());

        let outcome = service
            .send_from_account("owner@example.com", &params())
            .await
            .unwrap();

        assert!(!outcome.is_sent());
        assert_eq!(gmail.send_call_count(), 0);
    }

    #[test]
    fn test_diagnostic_params_send_to_self() {
        let params = diagnostic_params("owner@example.com");
        assert_eq!(params.from_email, params.to_emails);
        assert!(params.attachments.is_empty());
        assert_eq!(params.thread_id, None);
    }
}
