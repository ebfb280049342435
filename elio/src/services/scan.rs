use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::ScanDefaults;
use crate::db::{InventoryBackend, ItemStore, MovementStore, ScanStore};
use crate::error::{ElioError, Result};
use crate::extraction::extract_attributes;
use crate::models::{InventoryItem, InventoryMovement, ProductAttributes, ScanRecord};
use crate::vision::{ImageAnalysis, ImageAnnotator};

/// Product name stored by basic saves when nothing was identified.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Who performed a scan and on behalf of which organization.
#[derive(Debug, Clone, Default, Validate)]
pub struct ScanContext {
    #[validate(length(min = 1, max = 128))]
    pub user_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub organization_id: Option<String>,
}

impl ScanContext {
    /// Fill missing fields from configured defaults.
    pub fn with_defaults(self, defaults: &ScanDefaults) -> Self {
        Self {
            user_id: self.user_id.or_else(|| defaults.user_id.clone()),
            organization_id: self
                .organization_id
                .or_else(|| defaults.organization_id.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Scan with analysis payload, plus item and initial movement when a
    /// product was identified.
    Full,
    /// Scan row only, without the analysis payload.
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Created,
    NotIdentified,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanAnalysis {
    pub analysis: ImageAnalysis,
    pub product: ProductAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedScan {
    pub scan_id: String,
    pub item_id: Option<String>,
    /// Only reported by full saves.
    pub item_status: Option<ItemStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Persistence {
    /// No database configured.
    Disabled,
    /// The scan row could not be written; the analysis is still valid.
    Failed(String),
    Saved(SavedScan),
}

#[derive(Clone)]
pub struct ScanService {
    annotator: Arc<dyn ImageAnnotator>,
    store: Option<Arc<dyn InventoryBackend>>,
    defaults: ScanDefaults,
}

impl ScanService {
    pub fn new(
        annotator: Arc<dyn ImageAnnotator>,
        store: Option<Arc<dyn InventoryBackend>>,
        defaults: ScanDefaults,
    ) -> Self {
        Self {
            annotator,
            store,
            defaults,
        }
    }

    pub async fn analyze(&self, image: &[u8]) -> Result<ScanAnalysis> {
        let analysis = self.annotator.annotate(image).await?;
        let product = extract_attributes(&analysis.texts);

        debug!(
            texts = analysis.texts.len(),
            labels = analysis.labels.len(),
            objects = analysis.objects.len(),
            quantity = product.quantity,
            "Image analyzed"
        );

        Ok(ScanAnalysis { analysis, product })
    }

    /// Analyze an image and record it. Storage failures never fail the call:
    /// they are reported through [`Persistence`].
    pub async fn analyze_and_save(
        &self,
        image: &[u8],
        context: ScanContext,
        mode: SaveMode,
    ) -> Result<(ScanAnalysis, Persistence)> {
        context.validate()?;
        let context = context.with_defaults(&self.defaults);
        let result = self.analyze(image).await?;

        let Some(store) = &self.store else {
            debug!("No database configured, skipping save");
            return Ok((result, Persistence::Disabled));
        };

        let persistence = match mode {
            SaveMode::Full => self.save_full(store.as_ref(), &result, &context).await,
            SaveMode::Basic => self.save_basic(store.as_ref(), &result, &context).await,
        };

        Ok((result, persistence))
    }

    pub async fn get_scan(&self, id: &str) -> Result<ScanRecord> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ElioError::NotFound("Database not configured".to_string()))?;

        store
            .get_scan(id)
            .await?
            .ok_or_else(|| ElioError::NotFound(format!("Scan {id} not found")))
    }

    async fn save_full(
        &self,
        store: &dyn InventoryBackend,
        result: &ScanAnalysis,
        context: &ScanContext,
    ) -> Persistence {
        let product = &result.product;
        let mut scan = new_scan(result, context);
        scan.product_name = product.product_name.clone();

        match analysis_payload(result) {
            Ok(payload) => scan.analysis_data = Some(payload),
            Err(e) => warn!(error = %e, "Failed to encode analysis data, saving scan without it"),
        }

        if let Err(e) = store.create_scan(&scan).await {
            warn!(error = %e, backend = store.name(), "Failed to save scan");
            return Persistence::Failed(e.to_string());
        }
        info!(scan_id = %scan.id, "Saved scan");

        let Some(item) = InventoryItem::from_attributes(product, &scan.id) else {
            return Persistence::Saved(SavedScan {
                scan_id: scan.id,
                item_id: None,
                item_status: Some(ItemStatus::NotIdentified),
            });
        };

        if let Err(e) = store.create_item(&item).await {
            warn!(error = %e, scan_id = %scan.id, "Failed to save inventory item");
            return Persistence::Saved(SavedScan {
                scan_id: scan.id,
                item_id: None,
                item_status: Some(ItemStatus::NotIdentified),
            });
        }
        info!(item_id = %item.id, "Saved inventory item");

        let movement = InventoryMovement::initial(&item.id, &scan.id, item.quantity);
        match store.create_movement(&movement).await {
            Ok(()) => info!(movement_id = %movement.id, "Saved inventory movement"),
            Err(e) => warn!(error = %e, item_id = %item.id, "Failed to save inventory movement"),
        }

        Persistence::Saved(SavedScan {
            scan_id: scan.id,
            item_id: Some(item.id),
            item_status: Some(ItemStatus::Created),
        })
    }

    async fn save_basic(
        &self,
        store: &dyn InventoryBackend,
        result: &ScanAnalysis,
        context: &ScanContext,
    ) -> Persistence {
        let mut scan = new_scan(result, context);
        scan.product_name = Some(
            result
                .product
                .product_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
        );

        match store.create_scan(&scan).await {
            Ok(()) => {
                info!(scan_id = %scan.id, "Saved basic scan");
                Persistence::Saved(SavedScan {
                    scan_id: scan.id,
                    item_id: None,
                    item_status: None,
                })
            }
            Err(e) => {
                warn!(error = %e, backend = store.name(), "Failed to save basic scan");
                Persistence::Failed(e.to_string())
            }
        }
    }
}

fn new_scan(result: &ScanAnalysis, context: &ScanContext) -> ScanRecord {
    let mut scan = ScanRecord::new(result.analysis.full_text(), result.product.quantity);
    scan.organization_id = context.organization_id.clone();
    scan.scanned_by = context.user_id.clone();
    scan
}

fn analysis_payload(result: &ScanAnalysis) -> Result<String> {
    Ok(serde_json::to_string(&json!({
        "product_info": result.product,
        "objects": result.analysis.objects,
        "labels": result.analysis.labels,
    }))?)
}
