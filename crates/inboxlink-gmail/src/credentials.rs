//! OAuth credentials for outbound Gmail calls

use async_trait::async_trait;
use inboxlink_entities::accounts;
use std::fmt;

use crate::errors::GmailError;

/// Bearer credentials of one mail account
///
/// Only the access token is carried. Refreshing expired tokens is the job of
/// the authorization flow that writes the account row, not of this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn bearer_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Turns a stored account into credentials usable against the Gmail API
#[async_trait]
pub trait CredentialsResolver: Send + Sync {
    async fn resolve(&self, account: &accounts::Model) -> Result<Credentials, GmailError>;
}

/// Reads the tokens persisted on the account row by the authorization flow
#[derive(Debug, Clone, Default)]
pub struct AccountCredentialsResolver;

impl AccountCredentialsResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialsResolver for AccountCredentialsResolver {
    async fn resolve(&self, account: &accounts::Model) -> Result<Credentials, GmailError> {
        let token = account
            .token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| GmailError::MissingCredentials(account.id.clone()))?;

        Ok(Credentials::new(token))
    }
}
