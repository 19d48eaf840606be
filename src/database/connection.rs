use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

const MEMORY_URL: &str = "sqlite::memory:";

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    if database_url == MEMORY_URL {
        // Each connection to :memory: opens its own empty database, so the
        // pool must hold exactly one connection for the life of the process
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(60 * 60 * 24 * 365))
            .max_lifetime(Duration::from_secs(60 * 60 * 24 * 365));
    } else {
        // SQLite serialises writes, a small pool is enough
        opt.max_connections(20)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(3600));
    }

    opt.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => MEMORY_URL.to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => "sqlite://commander.db?mode=rwc".to_string(),
    }
}
