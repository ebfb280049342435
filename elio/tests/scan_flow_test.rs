//! Upload-to-database flow through the HTTP router, with the Vision API mocked
//! and a libSQL database in a temp directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use elio::api::{create_router, AppState};
use elio::config::{Config, ScanDefaults, ServerConfig};
use elio::db::{connect_backend, InventoryBackend, ItemStore, MovementStore, ScanStore};
use elio::vision::{ImageAnnotator, VisionProvider};

mod common;

use common::{annotate_body, libsql_config, vision_config, PNG};

const BOUNDARY: &str = "scan-flow-boundary";

struct Harness {
    app: axum::Router,
    store: Arc<dyn InventoryBackend>,
    _server: MockServer,
    _dir: TempDir,
}

async fn harness(label_text: &str) -> Harness {
    common::init_test_logger();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(annotate_body(label_text)))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let db_config = libsql_config(&dir);
    let store = connect_backend(&db_config).await.unwrap();

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_keys: Vec::new(),
            max_upload_bytes: 1024 * 1024,
        },
        vision: vision_config(server.uri(), 0),
        database: Some(db_config),
        scan_defaults: ScanDefaults {
            user_id: None,
            organization_id: Some("org-default".to_string()),
        },
    };

    let annotator: Arc<dyn ImageAnnotator> = Arc::new(VisionProvider::new(&config.vision));
    let app = create_router(AppState::new(config, annotator, Some(store.clone())));

    Harness {
        app,
        store,
        _server: server,
        _dir: dir,
    }
}

fn upload(uri: &str, user_id: Option<&str>) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"box.png\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(PNG);
    body.extend_from_slice(b"\r\n");
    if let Some(user_id) = user_id {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"user_id\"\r\n\r\n");
        body.extend_from_slice(user_id.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn analyze_and_save_records_scan_item_and_movement() {
    let h = harness("Sterile Nitrile Powder-Free Exam Gloves 10 boxes of 100 gloves").await;

    let (status, json) = send(&h.app, upload("/api/v1/analyze-and-save", Some("nurse-4"))).await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["saved"], true);
    assert_eq!(data["item_status"], "created");
    assert_eq!(data["product_info"]["quantity"], 1000);
    assert_eq!(data["product_info"]["material"], "nitrile");
    assert_eq!(
        data["product_info"]["features"],
        serde_json::json!(["sterile", "powder-free"])
    );
    assert_eq!(data["labels"][0]["description"], "Glove");
    assert_eq!(data["objects"][0]["name"], "Box");

    let scan_id = data["scan_id"].as_str().unwrap().to_string();
    let item_id = data["item_id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &h.app,
        Request::builder()
            .uri(format!("/api/v1/scans/{scan_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["scanned_by"], "nurse-4");
    assert_eq!(json["data"]["organization_id"], "org-default");
    assert_eq!(json["data"]["quantity"], 1000);
    assert_eq!(json["data"]["analysis_data"]["product_info"]["brand"], "Dynarex");

    let item = h.store.get_item(&item_id).await.unwrap().unwrap();
    assert_eq!(item.quantity, 1000);
    assert_eq!(item.features, vec!["sterile", "powder-free"]);

    let movements = h.store.list_movements_for_item(&item_id).await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].scan_id.as_deref(), Some(scan_id.as_str()));
}

#[tokio::test]
async fn basic_save_stores_scan_only() {
    let h = harness("Lot 4521 exp 2027").await;

    let (status, json) = send(&h.app, upload("/api/v1/analyze-and-save-basic", None)).await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["saved"], true);
    assert!(data.get("item_id").is_none());
    assert!(data.get("item_status").is_none());

    let scan_id = data["scan_id"].as_str().unwrap();
    let scan = h.store.get_scan(scan_id).await.unwrap().unwrap();
    assert_eq!(scan.product_name.as_deref(), Some("Unknown Product"));
    assert!(scan.analysis_data.is_none());
    assert!(scan.scanned_by.is_none());
}

#[tokio::test]
async fn unidentified_product_is_reported() {
    let h = harness("Gauze Sponges 200 count").await;

    let (status, json) = send(&h.app, upload("/api/v1/analyze-and-save", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["saved"], true);
    assert_eq!(json["data"]["item_status"], "not_identified");
    assert!(json["data"].get("item_id").is_some());
    assert!(json["data"]["item_id"].is_null());
    assert_eq!(json["data"]["product_info"]["quantity"], 200);
}

#[tokio::test]
async fn unknown_scan_is_not_found() {
    let h = harness("Latex").await;

    let (status, json) = send(
        &h.app,
        Request::builder()
            .uri("/api/v1/scans/00000000-0000-4000-8000-000000000000")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn health_reports_database_backend() {
    let h = harness("Latex").await;

    let (status, json) = send(
        &h.app,
        Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["database"]["status"], "ok");
    assert_eq!(json["data"]["database"]["backend"], "libsql");
    assert_eq!(json["data"]["vision"]["status"], "available");
}
