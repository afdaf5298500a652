use axum::http::StatusCode;
use axum_test::TestServer;
use image::{Rgb, RgbImage};
use photo_gallery::config::Config;
use photo_gallery::web::utils::{encode_json, encode_path};
use photo_gallery::web::{AppState, create_router};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct TestGallery {
    server: TestServer,
    photos: TempDir,
    _results: TempDir,
    results_path: PathBuf,
}

fn create_test_gallery() -> TestGallery {
    let photos = tempfile::tempdir().unwrap();
    let results = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.gallery.batch_size = 2;
    config.gallery.results_path = results.path().join("saved");
    config.gallery.default_folder = photos.path().to_string_lossy().into_owned();

    let state = AppState::from_config(config);
    let server = TestServer::new(create_router(state)).unwrap();

    TestGallery {
        server,
        results_path: results.path().join("saved"),
        photos,
        _results: results,
    }
}

fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([90, 90, 200]))
        .save(path)
        .unwrap();
}

fn canonical(path: &Path) -> String {
    fs::canonicalize(path).unwrap().to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_filter_paged_walks_through_batches() {
    let gallery = create_test_gallery();
    for name in ["a.jpg", "b.jpg", "c.JPG", "notes.txt"] {
        fs::write(gallery.photos.path().join(name), b"x").unwrap();
    }
    let folder = gallery.photos.path().to_string_lossy().into_owned();

    let response = gallery
        .server
        .post("/api/filter-paged")
        .form(&[("folder", folder.as_str()), ("regex", r"\.jpg$")])
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["files"].as_array().unwrap().len(), 2);
    assert_eq!(body["offset"], 2);
    assert_eq!(body["has_more"], true);
    assert_eq!(body["regex"], r"\.jpg$");

    let response = gallery
        .server
        .post("/api/filter-paged")
        .form(&[
            ("folder", folder.as_str()),
            ("regex", r"\.jpg$"),
            ("offset", "2"),
            ("limit", "2"),
        ])
        .await;
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 1);
    assert_eq!(body["has_more"], false);
    assert!(body["files"][0].as_str().unwrap().ends_with("c.JPG"));
}

#[tokio::test]
async fn test_filter_paged_errors_are_structured() {
    let gallery = create_test_gallery();
    let folder = gallery.photos.path().to_string_lossy().into_owned();

    let response = gallery
        .server
        .post("/api/filter-paged")
        .form(&[("folder", folder.as_str()), ("regex", "(")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid regex"));

    let missing = gallery.photos.path().join("missing");
    let response = gallery
        .server
        .post("/api/filter-paged")
        .form(&[("folder", &*missing.to_string_lossy())])
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Directory not found"));
}

#[tokio::test]
async fn test_full_image_reports_cache_status() {
    let gallery = create_test_gallery();
    let path = gallery.photos.path().join("photo.png");
    write_png(&path, 8, 8);
    let url = format!("/image/{}", encode_path(&path));

    let first = gallery.server.get(&url).await;
    first.assert_status_ok();
    assert_eq!(first.header("content-type"), "image/png");
    assert_eq!(first.header("x-cache"), "MISS");
    assert_eq!(first.as_bytes().as_ref(), fs::read(&path).unwrap().as_slice());

    let second = gallery.server.get(&url).await;
    assert_eq!(second.header("x-cache"), "HIT");
}

#[tokio::test]
async fn test_preview_is_bounded_jpeg() {
    let gallery = create_test_gallery();
    let path = gallery.photos.path().join("wide.png");
    write_png(&path, 1024, 256);

    let response = gallery
        .server
        .get(&format!("/preview/{}", encode_path(&path)))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/jpeg");

    let preview = image::load_from_memory(response.as_bytes()).unwrap();
    assert_eq!((preview.width(), preview.height()), (512, 128));
}

#[tokio::test]
async fn test_image_routes_reject_bad_input() {
    let gallery = create_test_gallery();

    let response = gallery.server.get("/image/not*base64").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let missing = gallery.photos.path().join("gone.jpg");
    let response = gallery
        .server
        .get(&format!("/preview/{}", encode_path(&missing)))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let text = gallery.photos.path().join("notes.txt");
    fs::write(&text, b"hello").unwrap();
    let response = gallery
        .server
        .get(&format!("/preview/{}", encode_path(&text)))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_view_locates_file_in_listing() {
    let gallery = create_test_gallery();
    for name in ["one.png", "two.png"] {
        write_png(&gallery.photos.path().join(name), 4, 4);
    }
    let data = encode_json(&json!({
        "folder": gallery.photos.path(),
        "regex": r"\.png$",
        "filename": "TWO.png",
    }))
    .unwrap();

    let response = gallery
        .server
        .get("/api/view")
        .add_query_param("data", &data)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["filename"], "two.png");
    assert_eq!(body["index"], 1);
    assert_eq!(body["file_list"], json!(["one.png", "two.png"]));
    assert_eq!(body["encoded_data"], data.as_str());

    let expected_path = canonical(&gallery.photos.path().join("two.png"));
    assert_eq!(body["full_path"], expected_path.as_str());

    let image_url = body["image_url"].as_str().unwrap();
    gallery.server.get(image_url).await.assert_status_ok();
}

#[tokio::test]
async fn test_view_rejects_bad_data() {
    let gallery = create_test_gallery();

    let response = gallery
        .server
        .get("/api/view")
        .add_query_param("data", "not-json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let data = encode_json(&json!({
        "folder": gallery.photos.path(),
        "regex": "",
        "filename": "../escape.png",
    }))
    .unwrap();
    let response = gallery
        .server
        .get("/api/view")
        .add_query_param("data", &data)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_and_list_results() {
    let gallery = create_test_gallery();
    let source = gallery.photos.path().join("keeper.png");
    write_png(&source, 4, 4);

    let response = gallery.server.get("/results/list").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));

    let request = json!({ "path": source });
    let response = gallery.server.post("/api/save-image").json(&request).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "saved": true, "already_exists": false })
    );
    assert!(gallery.results_path.join("keeper.png").is_file());

    let response = gallery.server.post("/api/save-image").json(&request).await;
    assert_eq!(response.json::<Value>()["already_exists"], true);

    let response = gallery.server.get("/results/list").await;
    assert_eq!(response.json::<Value>(), json!(["keeper.png"]));
}

#[tokio::test]
async fn test_save_image_validation() {
    let gallery = create_test_gallery();

    let response = gallery.server.post("/api/save-image").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = gallery
        .server
        .post("/api/save-image")
        .json(&json!({ "path": gallery.photos.path().join("nope.png") }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_config_endpoints() {
    let gallery = create_test_gallery();
    let path = gallery.photos.path().join("p.png");
    write_png(&path, 4, 4);
    gallery
        .server
        .get(&format!("/image/{}", encode_path(&path)))
        .await
        .assert_status_ok();

    let response = gallery.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["caches"]["full_images"]["entries"], 1);
    assert_eq!(body["caches"]["full_images"]["misses"], 1);
    assert_eq!(body["caches"]["previews"]["entries"], 0);
    assert!(body["caches"]["scans"]["max_entries"].as_u64().unwrap() > 0);

    let response = gallery.server.get("/api/config").await;
    let body: Value = response.json();
    assert_eq!(body["batch_size"], 2);
    assert_eq!(body["default_pattern"], r".*\.(png|jpg|jpeg)$");
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let gallery = create_test_gallery();
    let folder = gallery.photos.path().to_string_lossy().into_owned();

    let response = gallery
        .server
        .post("/api/filter-paged")
        .form(&[("folder", folder.as_str()), ("offset", "abc")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), "application/json");
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("offset"));

    let response = gallery
        .server
        .post("/api/filter-paged")
        .form(&[("regex", r"\.jpg$")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("folder"));

    let response = gallery.server.get("/api/view").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], false);

    let response = gallery
        .server
        .post("/api/save-image")
        .text("{not json")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], false);
}
