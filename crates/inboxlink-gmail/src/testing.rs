//! Fixtures shared by the crate's tests

use chrono::Utc;
use inboxlink_entities::accounts;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};

/// Insert an account row the way the authorization flow would
pub async fn insert_account(
    db: &DatabaseConnection,
    id: &str,
    email: &str,
    token: Option<&str>,
) -> accounts::Model {
    accounts::ActiveModel {
        id: Set(id.to_string()),
        kind: Set("gmail".to_string()),
        uid: Set(email.to_string()),
        name: Set(Some("Owner".to_string())),
        token: Set(token.map(str::to_string)),
        token_secret: Set(Some("refresh-secret".to_string())),
        token_expires_at: Set(Some(Utc::now())),
        scope: Set(Some("https://mail.google.com/".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
