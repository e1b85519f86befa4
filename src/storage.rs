//! Database connection and schema management.

use anyhow::{Context, Result};
use log::{debug, info};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait,
    Schema, TransactionTrait,
};

use crate::config::DatabaseConfig;
use crate::entities::{member, team};

/// Handle to the member/team database.
#[derive(Clone)]
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Connect with the given settings and create any missing tables.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(config.sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to {}", config.url))?;
        info!("Connected to {}", config.url);

        let storage = Storage { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Fresh single-connection in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::new(&DatabaseConfig::in_memory()).await
    }

    /// Create tables from the entity definitions. Teams come first because
    /// members reference them.
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut teams = schema.create_table_from_entity(team::Entity);
        teams.if_not_exists();
        self.conn.execute(backend.build(&teams)).await?;

        let mut members = schema.create_table_from_entity(member::Entity);
        members.if_not_exists();
        self.conn.execute(backend.build(&members)).await?;

        debug!("Schema ready");
        Ok(())
    }

    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        Ok(self.conn.begin().await?)
    }

    /// Check if the database has any data
    pub async fn has_data(&self) -> Result<bool> {
        let members = member::Entity::find().count(&self.conn).await?;
        let teams = team::Entity::find().count(&self.conn).await?;
        Ok(members + teams > 0)
    }

    /// Clear all data from the database
    pub async fn clear_all_data(&self) -> Result<()> {
        let txn = self.conn.begin().await?;
        member::Entity::delete_many().exec(&txn).await?;
        team::Entity::delete_many().exec(&txn).await?;
        txn.commit().await?;
        info!("Cleared all members and teams");
        Ok(())
    }
}
