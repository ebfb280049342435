pub mod backends;
mod connection;
pub mod repository;
pub(crate) mod schema;
pub mod traits;

use std::sync::Arc;

pub use backends::libsql::LibSqlBackend;
pub use backends::supabase::SupabaseBackend;
pub use connection::Database;
pub use traits::*;

use crate::config::{DatabaseConfig, DatabaseKind};
use crate::error::Result;

/// Open the backend selected by configuration.
pub async fn connect_backend(config: &DatabaseConfig) -> Result<Arc<dyn InventoryBackend>> {
    match config.kind {
        DatabaseKind::Supabase => Ok(Arc::new(SupabaseBackend::new(config)?)),
        DatabaseKind::LibSql => {
            let db = Database::new(config).await?;
            Ok(Arc::new(LibSqlBackend::new(db)))
        }
    }
}
