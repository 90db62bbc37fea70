//! Gmail integration services

mod account_service;
mod delivery_service;
mod integration_service;

pub use account_service::AccountService;
pub use delivery_service::{diagnostic_params, DeliveryOutcome, DeliveryService};
pub use integration_service::{
    CreateIntegrationRequest, IntegrationService, IntegrationSetup, SubscriptionOutcome,
};
