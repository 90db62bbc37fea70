use clap::Args;
use inboxlink_core::DatabaseConfig;
use inboxlink_migrations::Migrator;
use sea_orm_migration::MigratorTrait;
use tracing::info;

#[derive(Args)]
pub struct MigrateCommand {
    /// Database connection URL
    #[arg(long, env = "INBOXLINK_DATABASE_URL")]
    pub database_url: String,

    /// Roll back this many migrations instead of applying pending ones
    #[arg(long)]
    pub down: Option<u32>,
}

impl MigrateCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        match self.down {
            None => {
                // Connecting applies pending migrations
                inboxlink_database::establish_connection(&DatabaseConfig::new(
                    self.database_url.as_str(),
                ))
                .await?;
                info!("Database schema is up to date");
            }
            Some(steps) => {
                let db = inboxlink_database::sea_orm::Database::connect(self.database_url.as_str())
                    .await?;
                Migrator::down(&db, Some(steps)).await?;
                info!("Rolled back {} migration(s)", steps);
            }
        }
        Ok(())
    }
}
