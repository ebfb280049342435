mod items;
mod movements;
mod scans;

pub use items::ItemRepository;
pub use movements::MovementRepository;
pub use scans::ScanRepository;

use chrono::{DateTime, Utc};

pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

pub(crate) fn quantity_from_db(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
pub(crate) async fn setup_test_db() -> libsql::Connection {
    let conn = libsql::Builder::new_local(":memory:")
        .build()
        .await
        .unwrap()
        .connect()
        .unwrap();

    crate::db::schema::init_schema(&conn).await.unwrap();
    conn
}
