//! REST API behavior tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use docstruct_extractors::DocumentProcessor;
use docstruct_server::{create_server, AppState, ServerConfig};
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "test-boundary-7d93a1";

fn app() -> axum::Router {
    app_with_config(ServerConfig::default())
}

fn app_with_config(config: ServerConfig) -> axum::Router {
    let processor = DocumentProcessor::new(Some(Arc::new(
        docstruct_extractors::RuleBasedModel::new(),
    )));
    create_server(AppState::new(processor, config))
}

fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(filename, content_type, data)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["entity_model_loaded"], true);
    assert!(body["supported_formats"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "application/pdf"));
}

#[tokio::test]
async fn test_formats() {
    let response = app()
        .oneshot(Request::builder().uri("/formats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["max_file_size"], "50MB");
    assert!(body["processing_methods"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m == "pdfplumber_tables"));
}

#[tokio::test]
async fn test_csv_upload_roundtrip() {
    let csv = b"Name,Email\nAda,ada@example.com\nGrace,\n";
    let response = app()
        .oneshot(upload_request("people.csv", "text/csv", csv))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "people.csv");
    assert_eq!(body["file_type"], "text/csv");
    assert_eq!(body["row_count"], 2);
    assert_eq!(body["column_count"], 2);
    assert_eq!(body["extracted_data"]["extraction_method"], "csv_parser");
    assert_eq!(body["extracted_data"]["data"][1]["Email"], "");
}

#[tokio::test]
async fn test_unsupported_type_is_client_error() {
    let response = app()
        .oneshot(upload_request("archive.zip", "application/zip", b"PK"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("application/zip"));
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_before_processing() {
    let config = ServerConfig {
        max_upload_bytes: 16,
        ..ServerConfig::default()
    };
    let payload = vec![b'a'; 64];
    let response = app_with_config(config)
        .oneshot(upload_request("big.csv", "text/csv", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_missing_file_field() {
    let request = Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(format!("--{BOUNDARY}--\r\n")))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_broken_spreadsheet_is_server_error() {
    let response = app()
        .oneshot(upload_request(
            "broken.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            b"not a workbook",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
}
