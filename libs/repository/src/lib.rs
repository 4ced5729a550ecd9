use std::{sync::Arc, time::Duration};

use event::EventRepository;
use migration::Migrator;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::response::IntoResponse;

mod active_models;
pub mod event;
mod response;

#[derive(Clone, Debug)]
pub struct Repository {
    pub event: EventRepository,
}

impl Repository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self {
            event: EventRepository::new(Arc::new(db), timeout),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoreOptions {
    pub max_connections: u32,
    /// Upper bound for connecting and for every single store call.
    pub timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },

    #[error("store call timed out after {:?}: {}", after, message)]
    Timeout { message: String, after: Duration },
}

pub async fn init_repository(
    db_url: &str,
    options: &StoreOptions,
) -> Result<Repository, RepositoryError> {
    let db = init_db(db_url, options).await?;

    info!(task = "repository ready");

    Ok(Repository::new(db, options.timeout))
}

async fn init_db(
    db_url: &str,
    options: &StoreOptions,
) -> Result<DatabaseConnection, RepositoryError> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(options.max_connections)
        .min_connections(1)
        .connect_timeout(options.timeout)
        .acquire_timeout(options.timeout)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    Ok(db)
}
