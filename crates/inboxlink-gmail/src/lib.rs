//! Gmail integration for Inboxlink
//!
//! Links accounts authorized elsewhere to Gmail: subscribes their mailboxes
//! to push notifications and sends mail on their behalf.
//!
//! - [`mime`] composes RFC 2822 multipart messages
//! - [`providers`] talks to the Gmail REST API
//! - [`services`] orchestrates integration setup and delivery
//! - [`handlers`] exposes both over HTTP

pub mod config;
pub mod credentials;
pub mod errors;
pub mod handlers;
pub mod mime;
pub mod providers;
pub mod services;

#[cfg(test)]
mod testing;

pub use config::GmailConfig;
pub use credentials::{AccountCredentialsResolver, Credentials, CredentialsResolver};
pub use errors::GmailError;
pub use handlers::{configure_routes, AppState, GmailApiDoc};
pub use mime::{Attachment, MailParams, MessageComposer};
pub use providers::{GmailApi, GmailMessage, GoogleGmailClient, WatchResponse};
pub use services::{
    AccountService, DeliveryOutcome, DeliveryService, IntegrationService, SubscriptionOutcome,
};
