use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{prelude::BASE64_STANDARD, Engine};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use serde_json::{json, Value};
use tower::ServiceExt;

use leaf_disease::backend::{default_device, InferenceBackend};
use leaf_disease::{Classifier, KnowledgeBase, LeafClassifier, LeafClassifierConfig, Normalization};

use super::router;
use crate::state::{AppState, ServerConfig};

const BOUNDARY: &str = "leafuploadboundary";

fn loaded_app() -> Router {
    loaded_app_with(ServerConfig::default())
}

fn loaded_app_with(config: ServerConfig) -> Router {
    let knowledge = KnowledgeBase::builtin();
    let model_config = LeafClassifierConfig::new()
        .with_num_classes(knowledge.len())
        .with_input_size(32)
        .with_base_filters(4);
    let model = LeafClassifier::<InferenceBackend>::new(&model_config, &default_device());
    let classifier = Classifier::new(
        model,
        model_config,
        knowledge.labels().to_vec(),
        Normalization::ImageNet,
    )
    .unwrap();

    router(Arc::new(AppState::new(config, Some(classifier), knowledge)))
}

fn degraded_app() -> Router {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        model_path: dir.path().join("leaf_disease_model.mpk"),
        ..ServerConfig::default()
    };
    router(Arc::new(AppState::bootstrap(config).unwrap()))
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

fn leaf_png() -> Vec<u8> {
    let leaf = RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 3) as u8, 140, (y * 4) as u8]));
    encode(DynamicImage::ImageRgb8(leaf), ImageFormat::Png)
}

struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    data: &'a [u8],
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match part.file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                part.name, file_name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn predict_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn scan_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/disease_scan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn labels(body: &Value) -> Vec<String> {
    body["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let (status, body) = send(loaded_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["classes_count"], 16);
}

#[tokio::test]
async fn health_reports_missing_model_file() {
    let (status, body) = send(degraded_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["classes_count"], 16);
}

#[tokio::test]
async fn classes_lists_sixteen_complete_records() {
    let (status, body) = send(loaded_app(), get("/classes")).await;
    assert_eq!(status, StatusCode::OK);

    let classes = labels(&body);
    assert_eq!(classes.len(), 16);

    for label in &classes {
        let record = &body["disease_info"][label];
        assert!(!record["treatment"].as_str().unwrap().is_empty(), "{}", label);
        assert!(!record["prevention"].as_str().unwrap().is_empty(), "{}", label);
        assert!(record["severity"].is_string());
    }
}

#[tokio::test]
async fn supported_classes_matches_classes() {
    let (_, classes) = send(loaded_app(), get("/classes")).await;
    let (status, supported) = send(loaded_app(), get("/supported_classes")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(classes, supported);
}

#[tokio::test]
async fn predict_returns_diagnosis_for_valid_image() {
    let (_, classes) = send(loaded_app(), get("/classes")).await;
    let known = labels(&classes);

    let png = leaf_png();
    let request = predict_request(&[Part {
        name: "image",
        file_name: Some("leaf.png"),
        data: &png,
    }]);
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let result = &body["result"];
    let confidence = result["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&confidence));
    assert!(known.contains(&result["raw_class"].as_str().unwrap().to_string()));
    assert!(!result["disease"].as_str().unwrap().is_empty());
    assert!(!result["treatment"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn predict_converts_grayscale_jpeg() {
    let gray = GrayImage::from_fn(40, 40, |x, _| Luma([(x * 6) as u8]));
    let jpeg = encode(DynamicImage::ImageLuma8(gray), ImageFormat::Jpeg);

    let request = predict_request(&[Part {
        name: "image",
        file_name: Some("leaf.jpg"),
        data: &jpeg,
    }]);
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn predict_without_image_field_is_bad_request() {
    let png = leaf_png();
    let request = predict_request(&[Part {
        name: "photo",
        file_name: Some("leaf.png"),
        data: &png,
    }]);
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image provided");
}

#[tokio::test]
async fn predict_with_empty_filename_is_bad_request() {
    let png = leaf_png();
    let request = predict_request(&[Part {
        name: "image",
        file_name: Some(""),
        data: &png,
    }]);
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image selected");
}

#[tokio::test]
async fn predict_with_empty_upload_is_bad_request() {
    let request = predict_request(&[Part {
        name: "image",
        file_name: Some("leaf.png"),
        data: &[],
    }]);
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Uploaded image is empty");
}

#[tokio::test]
async fn predict_over_upload_limit_is_payload_too_large() {
    let app = loaded_app_with(ServerConfig {
        max_upload_mb: 1,
        ..ServerConfig::default()
    });
    let oversized = vec![0u8; 2 * 1024 * 1024];
    let request = predict_request(&[Part {
        name: "image",
        file_name: Some("leaf.png"),
        data: &oversized,
    }]);
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Uploaded image is too large (limit is 1 MB)");
}

#[tokio::test]
async fn disease_scan_over_upload_limit_is_payload_too_large() {
    let app = loaded_app_with(ServerConfig {
        max_upload_mb: 1,
        ..ServerConfig::default()
    });
    let image = BASE64_STANDARD.encode(vec![0u8; 2 * 1024 * 1024]);
    let (status, body) = send(app, scan_request(json!({ "image": image }))).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Uploaded image is too large (limit is 1 MB)");
}

#[tokio::test]
async fn predict_with_non_multipart_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image provided");
}

#[tokio::test]
async fn predict_with_undecodable_image_is_server_error() {
    let request = predict_request(&[Part {
        name: "image",
        file_name: Some("leaf.png"),
        data: b"these bytes are not an image",
    }]);
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("decode"));
}

#[tokio::test]
async fn predict_without_model_is_server_error() {
    let png = leaf_png();
    let request = predict_request(&[Part {
        name: "image",
        file_name: Some("leaf.png"),
        data: &png,
    }]);
    let (status, body) = send(degraded_app(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model not loaded");
}

#[tokio::test]
async fn disease_scan_accepts_data_url() {
    let image = format!(
        "data:image/png;base64,{}",
        BASE64_STANDARD.encode(leaf_png())
    );
    let (status, body) = send(loaded_app(), scan_request(json!({ "image": image }))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["disease"].is_string());
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&confidence));
}

#[tokio::test]
async fn disease_scan_rejects_invalid_base64() {
    let (status, body) = send(
        loaded_app(),
        scan_request(json!({ "image": "invalid_base64" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn disease_scan_without_model_is_server_error() {
    let image = BASE64_STANDARD.encode(leaf_png());
    let (status, body) = send(degraded_app(), scan_request(json!({ "image": image }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model not loaded");
}
