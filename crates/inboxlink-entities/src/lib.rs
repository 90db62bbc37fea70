pub mod accounts;
pub mod integrations;

pub mod prelude {
    pub use super::accounts::Entity as Accounts;
    pub use super::integrations::Entity as Integrations;
}
