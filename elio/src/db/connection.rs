use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::{DatabaseConfig, SqlitePragmas};
use crate::error::Result;

use super::schema;

/// Where the libSQL data lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Local,
    Remote,
    /// Local file kept in sync with a remote primary.
    Replica,
}

#[derive(Clone)]
pub struct Database {
    db: Arc<libsql::Database>,
    mode: StorageMode,
}

impl Database {
    /// Open the database described by `config`, apply its pragmas and create
    /// the inventory tables.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let auth_token = config.auth_token.clone().unwrap_or_default();

        let (db, mode) = match (is_remote_url(&config.url), config.local_path.as_ref()) {
            (true, Some(local_path)) => (
                Builder::new_remote_replica(local_path, config.url.clone(), auth_token)
                    .build()
                    .await?,
                StorageMode::Replica,
            ),
            (true, None) => (
                Builder::new_remote(config.url.clone(), auth_token)
                    .build()
                    .await?,
                StorageMode::Remote,
            ),
            (false, _) => {
                let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
                (Builder::new_local(path).build().await?, StorageMode::Local)
            }
        };

        let database = Self {
            db: Arc::new(db),
            mode,
        };
        tracing::debug!(mode = ?mode, "Opened libSQL database");

        let conn = database.connect()?;
        if mode != StorageMode::Remote {
            apply_pragmas(&conn, &config.pragmas).await;
        }
        schema::init_schema(&conn).await?;

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    /// Pull from the primary. A no-op unless running as an embedded replica.
    pub async fn sync(&self) -> Result<()> {
        if self.mode != StorageMode::Replica {
            return Ok(());
        }

        match self.db.sync().await {
            Ok(replicated) => {
                tracing::debug!("Replica synced: {:?}", replicated);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Replica sync failed");
                Err(e.into())
            }
        }
    }
}

/// Pragma failures are logged; the database stays usable with SQLite defaults.
async fn apply_pragmas(conn: &Connection, pragmas: &SqlitePragmas) {
    let statements = [
        format!("PRAGMA busy_timeout = {}", pragmas.busy_timeout_ms),
        format!("PRAGMA journal_mode = {}", pragmas.journal_mode),
        format!("PRAGMA synchronous = {}", pragmas.synchronous),
    ];

    for sql in &statements {
        if let Err(error) = conn.execute_batch(sql).await {
            tracing::warn!(%sql, error = %error, "Failed to apply SQLite pragma");
        }
    }
}

fn is_remote_url(url: &str) -> bool {
    url.starts_with("libsql://") || url.starts_with("https://")
}
