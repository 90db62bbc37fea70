//! Read access to the externally managed account store

use inboxlink_entities::accounts;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use crate::errors::GmailError;

#[derive(Clone)]
pub struct AccountService {
    db: Arc<DatabaseConnection>,
}

impl AccountService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, account_id: &str) -> Result<accounts::Model, GmailError> {
        accounts::Entity::find_by_id(account_id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| GmailError::AccountNotFound(format!("id {}", account_id)))
    }

    /// Look up the account whose mailbox address is `email`
    pub async fn find_by_email(&self, email: &str) -> Result<accounts::Model, GmailError> {
        accounts::Entity::find()
            .filter(accounts::Column::Uid.eq(email))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| GmailError::AccountNotFound(format!("email {}", email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::insert_account;
    use inboxlink_database::test_utils::TestDatabase;

    #[tokio::test]
    async fn test_find_by_id() {
        let db = TestDatabase::with_migrations().await.unwrap();
        insert_account(db.connection(), "acc-1", "owner@example.com", Some("token")).await;
        let service = AccountService::new(db.connection_arc());

        let account = service.find_by_id("acc-1").await.unwrap();
        assert_eq!(account.uid, "owner@example.com");

        let missing = service.find_by_id("acc-2").await;
        assert!(matches!(missing, Err(GmailError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let db = TestDatabase::with_migrations().await.unwrap();
        insert_account(db.connection(), "acc-1", "owner@example.com", Some("token")).await;
        let service = AccountService::new(db.connection_arc());

        let account = service.find_by_email("owner@example.com").await.unwrap();
        assert_eq!(account.id, "acc-1");

        let missing = service.find_by_email("nobody@example.com").await;
        assert_eq!(
            missing.unwrap_err().to_string(),
            "Account not found with email nobody@example.com"
        );
    }
}
