use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr};
use tracing::{error, info};

use crate::config::DbConfig;

/// Handle to the relational store. Every domain file under `db/` adds an `impl` block.
#[derive(Clone, Debug)]
pub struct DbService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DbService {
    /// Connects and brings the schema up to date.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .sqlx_logging(false);

        info!(max_connections = config.max_connections, "Connecting to database...");
        let database_connection = Database::connect(options).await?;

        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");

        Ok(Self { database_connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }

    /// Undo a failed unit of work. A rollback failure is only logged so the
    /// caller still answers with the error that caused it.
    pub(crate) async fn rollback(txn: DatabaseTransaction) {
        if let Err(err) = txn.rollback().await {
            error!(error = %err, "transaction rollback failed");
        }
    }
}
