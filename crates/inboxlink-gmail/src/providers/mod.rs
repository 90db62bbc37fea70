//! Gmail provider abstractions and implementations

mod google;
mod traits;

#[cfg(test)]
pub mod mock;

pub use google::GoogleGmailClient;
pub use traits::*;

#[cfg(test)]
pub use mock::MockGmailApi;
