pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommand;
pub use serve::ServeCommand;
