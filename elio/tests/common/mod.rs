// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Once;

use elio::config::{DatabaseConfig, DatabaseKind, SqlitePragmas, VisionConfig};
use serde_json::json;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Smallest byte sequence the upload check recognizes as a PNG.
pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn vision_config(base_url: String, max_retries: u32) -> VisionConfig {
    VisionConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        timeout_secs: 5,
        max_retries,
        max_results: 10,
    }
}

pub fn libsql_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        kind: DatabaseKind::LibSql,
        url: format!("file:{}", dir.path().join("elio.db").display()),
        auth_token: None,
        local_path: None,
        timeout_secs: 5,
        pragmas: SqlitePragmas::default(),
    }
}

/// `images:annotate` response for a single image whose full text is `text`.
pub fn annotate_body(text: &str) -> serde_json::Value {
    let mut text_annotations = vec![json!({ "locale": "en", "description": text })];
    text_annotations.extend(
        text.split_whitespace()
            .map(|word| json!({ "description": word, "score": 0.9 })),
    );

    json!({
        "responses": [{
            "textAnnotations": text_annotations,
            "labelAnnotations": [
                { "mid": "/m/0174n1", "description": "Glove", "score": 0.97 },
                { "mid": "/m/02wbm", "description": "Packaging", "score": 0.81 }
            ],
            "localizedObjectAnnotations": [
                { "mid": "/m/0174n1", "name": "Box", "score": 0.88 }
            ]
        }]
    })
}

// Re-export commonly used crates for convenience
pub use serial_test::serial;
pub use tempfile;
pub use wiremock;
