mod shutdown;

use axum::Router;
use clap::Args;
use inboxlink_core::ServerConfig;
use inboxlink_database::DbConnection;
use inboxlink_gmail::config::DEFAULT_API_BASE_URL;
use inboxlink_gmail::{
    configure_routes, AccountCredentialsResolver, AccountService, AppState, DeliveryService,
    GmailApi, GmailConfig, GoogleGmailClient, IntegrationService,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use shutdown::shutdown_signal;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:3000", env = "INBOXLINK_ADDRESS")]
    pub address: String,

    /// Database connection URL
    #[arg(long, env = "INBOXLINK_DATABASE_URL")]
    pub database_url: String,

    /// Google Cloud project owning the Pub/Sub topic
    #[arg(long, env = "INBOXLINK_GOOGLE_PROJECT_ID")]
    pub google_project_id: String,

    /// Pub/Sub topic receiving Gmail push notifications
    #[arg(long, env = "INBOXLINK_GOOGLE_TOPIC")]
    pub google_topic: String,

    /// Base URL of the Gmail REST API
    #[arg(long, default_value = DEFAULT_API_BASE_URL, env = "INBOXLINK_GMAIL_API_URL")]
    pub gmail_api_url: String,

    /// Timeout for calls to the Gmail API, in seconds
    #[arg(long, default_value_t = 30, env = "INBOXLINK_HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: u64,

    /// Mailbox used by the diagnostic send route (disabled when unset)
    #[arg(long, env = "INBOXLINK_DIAGNOSTIC_EMAIL")]
    pub diagnostic_email: Option<String>,
}

impl ServeCommand {
    pub fn gmail_config(&self) -> GmailConfig {
        GmailConfig {
            api_base_url: self.gmail_api_url.clone(),
            project_id: self.google_project_id.clone(),
            topic: self.google_topic.clone(),
            timeout_secs: self.http_timeout_secs,
            diagnostic_email: self.diagnostic_email.clone(),
            ..Default::default()
        }
    }

    pub fn execute(self) -> anyhow::Result<()> {
        let server_config = ServerConfig::new(self.address.clone(), self.database_url.clone());
        let gmail_config = self.gmail_config();
        gmail_config.validate()?;

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async move {
            debug!("Initializing database connection...");
            let db = inboxlink_database::establish_connection(&server_config.database).await?;

            let gmail: Arc<dyn GmailApi> = Arc::new(GoogleGmailClient::new(&gmail_config)?);
            let app = build_app(db, gmail, &gmail_config);

            let listener = TcpListener::bind(&server_config.address).await?;
            info!("Inboxlink server listening on {}", server_config.address);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            info!("Inboxlink server exited");
            Ok::<(), anyhow::Error>(())
        })
    }
}

/// Wire services into the HTTP router
pub fn build_app(db: Arc<DbConnection>, gmail: Arc<dyn GmailApi>, config: &GmailConfig) -> Router {
    let account_service = Arc::new(AccountService::new(db.clone()));
    let credentials = Arc::new(AccountCredentialsResolver::new());

    let state = Arc::new(AppState {
        integration_service: Arc::new(IntegrationService::new(
            db,
            account_service.clone(),
            gmail.clone(),
            credentials.clone(),
        )),
        delivery_service: Arc::new(DeliveryService::new(gmail, account_service, credentials)),
        diagnostic_email: config.diagnostic_email.clone(),
    });

    configure_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
