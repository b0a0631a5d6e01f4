//! Pooled SQLite connection

use crate::config::Settings;
use di::{Ref, ServiceDescriptor, singleton_as_self};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::ops::Deref;

pub struct DatabaseConnection {
    connection: SqlitePool,
}

impl DatabaseConnection {
    pub fn new(connection: SqlitePool) -> DatabaseConnection {
        DatabaseConnection { connection }
    }

    pub async fn connect(settings: &Settings) -> Result<DatabaseConnection, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.database_max_connections)
            .connect(&settings.database_url)
            .await?;

        Ok(DatabaseConnection::new(pool))
    }

    /// Registers `pool` as the connection every repository shares.
    pub fn singleton(pool: SqlitePool) -> ServiceDescriptor {
        singleton_as_self::<DatabaseConnection>()
            .from(move |_| Ref::new(DatabaseConnection::new(pool.clone())))
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}
