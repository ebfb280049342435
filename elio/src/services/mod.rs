mod scan;

pub use scan::{
    Persistence, SaveMode, SavedScan, ScanAnalysis, ScanContext, ScanService, ItemStatus,
    UNKNOWN_PRODUCT,
};
