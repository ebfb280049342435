//! Request/response DTOs for the v1 API.

pub mod analysis;
pub mod scans;

pub use analysis::*;
pub use scans::*;
