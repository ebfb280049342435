pub mod analyze;
pub(crate) mod health;
pub mod scans;

pub use health::{health_check, ping};
