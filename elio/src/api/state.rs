use std::sync::Arc;

use crate::config::Config;
use crate::db::InventoryBackend;
use crate::services::ScanService;
use crate::vision::ImageAnnotator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub annotator: Arc<dyn ImageAnnotator>,
    /// `None` when no database is configured; scans are analyzed but not kept.
    pub store: Option<Arc<dyn InventoryBackend>>,
    pub scans: ScanService,
}

impl AppState {
    pub fn new(
        config: Config,
        annotator: Arc<dyn ImageAnnotator>,
        store: Option<Arc<dyn InventoryBackend>>,
    ) -> Self {
        let scans = ScanService::new(
            annotator.clone(),
            store.clone(),
            config.scan_defaults.clone(),
        );

        Self {
            config: Arc::new(config),
            annotator,
            store,
            scans,
        }
    }
}
