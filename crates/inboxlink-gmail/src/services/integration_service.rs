//! Integration setup: record creation and push subscription

use inboxlink_entities::accounts;
use inboxlink_entities::integrations::{self, SubscriptionStatus};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::credentials::CredentialsResolver;
use crate::errors::GmailError;
use crate::providers::{GmailApi, WatchResponse};
use crate::services::AccountService;

/// Request to link an external integration to a mail account
#[derive(Debug, Clone)]
pub struct CreateIntegrationRequest {
    pub account_id: String,
    /// Identifier of the integration in the calling system
    pub integration_id: String,
    pub email: String,
}

/// Result of the push subscription attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Subscribed(WatchResponse),
    Failed(String),
}

impl SubscriptionOutcome {
    pub fn is_subscribed(&self) -> bool {
        matches!(self, SubscriptionOutcome::Subscribed(_))
    }
}

/// Persisted integration together with how its subscription went
#[derive(Debug, Clone)]
pub struct IntegrationSetup {
    pub integration: integrations::Model,
    pub subscription: SubscriptionOutcome,
}

pub struct IntegrationService {
    db: Arc<DatabaseConnection>,
    account_service: Arc<AccountService>,
    gmail: Arc<dyn GmailApi>,
    credentials: Arc<dyn CredentialsResolver>,
}

impl IntegrationService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        account_service: Arc<AccountService>,
        gmail: Arc<dyn GmailApi>,
        credentials: Arc<dyn CredentialsResolver>,
    ) -> Self {
        Self {
            db,
            account_service,
            gmail,
            credentials,
        }
    }

    /// Create an integration and subscribe its mailbox to push notifications
    ///
    /// The flow is:
    /// 1. Load the account; a missing account fails before anything is written
    /// 2. Insert the integration record as `pending`
    /// 3. Resolve credentials and start the Gmail watch
    /// 4. Update the record whatever the subscription outcome: cursor and
    ///    expiration on success, `failed` with the reason otherwise
    ///
    /// Only lookup and database errors are returned as `Err`.
    pub async fn create(
        &self,
        request: CreateIntegrationRequest,
    ) -> Result<IntegrationSetup, GmailError> {
        let account = self.account_service.find_by_id(&request.account_id).await?;

        let integration = integrations::ActiveModel {
            kind: Set(integrations::KIND_GMAIL.to_string()),
            account_id: Set(account.id.clone()),
            erxes_api_id: Set(request.integration_id.clone()),
            email: Set(request.email.clone()),
            subscription_status: Set(SubscriptionStatus::Pending.to_string()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        debug!(
            "Created integration {} for account {}",
            integration.id, account.id
        );

        let subscription = self.subscribe(&account).await;

        let mut active_model: integrations::ActiveModel = integration.into();
        match &subscription {
            SubscriptionOutcome::Subscribed(watch) => {
                active_model.gmail_history_id = Set(Some(watch.history_id.clone()));
                active_model.expiration = Set(watch.expiration);
                active_model.subscription_status =
                    Set(SubscriptionStatus::Subscribed.to_string());
                active_model.subscription_error = Set(None);
            }
            SubscriptionOutcome::Failed(reason) => {
                active_model.gmail_history_id = Set(None);
                active_model.expiration = Set(None);
                active_model.subscription_status = Set(SubscriptionStatus::Failed.to_string());
                active_model.subscription_error = Set(Some(reason.clone()));
            }
        }
        let integration = active_model.update(self.db.as_ref()).await?;

        if subscription.is_subscribed() {
            info!(
                "Integration {} subscribed to Gmail push notifications",
                integration.id
            );
        }

        Ok(IntegrationSetup {
            integration,
            subscription,
        })
    }

    /// Mailbox address of the account
    pub async fn get_email(&self, account_id: &str) -> Result<String, GmailError> {
        let account = self.account_service.find_by_id(account_id).await?;
        Ok(account.uid)
    }

    async fn subscribe(&self, account: &accounts::Model) -> SubscriptionOutcome {
        let result = match self.credentials.resolve(account).await {
            Ok(credentials) => self.gmail.watch(&account.id, &credentials).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(watch) => SubscriptionOutcome::Subscribed(watch),
            Err(e) => {
                error!(
                    "Failed to subscribe account {} to Gmail push notifications: {}",
                    account.id, e
                );
                SubscriptionOutcome::Failed(e.to_string())
            }
        }
    }
}
