//! API integration tests, driving the router in-process

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use bookshelf_server::{
    api,
    config::StorageConfig,
    repository::Repository,
    services::Services,
    AppState,
};

/// Helper to build an application backed by a library file in a temporary directory
async fn test_app(dir: &TempDir) -> Router {
    let storage = StorageConfig {
        path: dir.path().join("library.json"),
        pretty: true,
    };
    let repository = Repository::open(&storage)
        .await
        .expect("Failed to open repository");
    api::create_router(AppState {
        services: Arc::new(Services::new(repository)),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn new_book(author: &str, title: &str, series: &str) -> Value {
    json!({
        "author": author,
        "title": title,
        "genre": "G",
        "year": 2000,
        "series": series,
        "series_order": 1
    })
}

#[tokio::test]
async fn test_health_and_root() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, "GET", "/api/v1/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_book_crud() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({
            "author": "  Frank Herbert ",
            "title": "Dune",
            "genre": "SF",
            "year": 1965
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], "Frank Herbert");
    assert_eq!(body["read"], false);
    assert_eq!(body["quotes"], json!([]));

    let (status, body) = send(&app, "GET", "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, body) = send(&app, "GET", "/api/v1/books/frank%20herbert/DUNE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 1965);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/books/Frank%20Herbert/Dune",
        Some(json!({ "title": "Dune (1965)", "genre": "Science Fiction" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Dune (1965)");
    assert_eq!(body["genre"], "Science Fiction");
    assert_eq!(body["year"], 1965);

    let (status, _) = send(&app, "GET", "/api/v1/books/Frank%20Herbert/Dune", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        send(&app, "DELETE", "/api/v1/books/Frank%20Herbert/Dune%20(1965)", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) =
        send(&app, "DELETE", "/api/v1/books/Frank%20Herbert/Dune%20(1965)", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "author": "A", "title": "T", "genre": "  ", "year": 2000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "author": "A", "title": "T", "genre": "G", "year": 10000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/v1/books", Some(json!("not an object"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/api/v1/books", Some(new_book("A", "T", ""))).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/quotes/A/T",
        Some(json!({ "quote": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/books/A/T",
        Some(json!({ "year": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_book_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let (status, _) = send(&app, "POST", "/api/v1/books", Some(new_book("A", "T", ""))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", "/api/v1/books", Some(new_book("a", "t", ""))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
async fn test_series_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    send(&app, "POST", "/api/v1/books", Some(new_book("A", "T1", "S"))).await;
    send(&app, "POST", "/api/v1/books", Some(new_book("B", "T2", "S"))).await;

    let (_, series) = send(&app, "GET", "/api/v1/series", None).await;
    assert_eq!(series.as_array().unwrap().len(), 1);
    assert_eq!(series[0]["name"], "S");
    assert_eq!(series[0]["total"], 2);
    assert_eq!(series[0]["read"], 0);

    let (status, _) = send(&app, "POST", "/api/v1/read/A/T1", Some(json!({ "read": true }))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, series) = send(&app, "GET", "/api/v1/series", None).await;
    assert_eq!(series[0]["read"], 1);

    // marking again changes nothing
    send(&app, "POST", "/api/v1/read/A/T1", Some(json!({ "read": true }))).await;
    let (_, series) = send(&app, "GET", "/api/v1/series", None).await;
    assert_eq!(series[0]["read"], 1);

    let (status, body) = send(&app, "PUT", "/api/v1/books/B/T2", Some(json!({ "series": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("series").is_none());
    let (_, series) = send(&app, "GET", "/api/v1/series", None).await;
    assert_eq!(series[0]["total"], 1);
    assert_eq!(series[0]["books"][0]["title"], "T1");

    send(&app, "DELETE", "/api/v1/books/A/T1", None).await;
    let (_, series) = send(&app, "GET", "/api/v1/series", None).await;
    assert_eq!(series, json!([]));
}

#[tokio::test]
async fn test_series_name_spelling_follows_series() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    send(&app, "POST", "/api/v1/books", Some(new_book("A", "T1", "Saga"))).await;
    let (status, body) = send(&app, "POST", "/api/v1/books", Some(new_book("A", "T2", "SAGA"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["series"], "Saga");

    let (status, body) = send(&app, "PUT", "/api/v1/books/A/T1", Some(json!({ "series": "saga" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"], "Saga");

    let (_, series) = send(&app, "GET", "/api/v1/series", None).await;
    assert_eq!(series[0]["name"], "Saga");
    assert_eq!(series[0]["total"], 2);
}

#[tokio::test]
async fn test_quotes_and_read_status() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    send(&app, "POST", "/api/v1/books", Some(new_book("A", "T", ""))).await;
    for quote in ["first", "second"] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/quotes/A/T",
            Some(json!({ "quote": quote })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Quote added");
    }

    let (status, body) = send(&app, "GET", "/api/v1/quotes/a/t", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quotes"], json!(["first", "second"]));

    let (status, _) = send(&app, "GET", "/api/v1/quotes/A/Unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/quotes/A/Unknown",
        Some(json!({ "quote": "lost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/read/A/Unknown",
        Some(json!({ "read": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let (status, stats) = send(&app, "GET", "/api/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_books"], 0);
    assert_eq!(stats["read_percentage"], 0.0);
    assert_eq!(stats["series_stats"], json!([]));

    send(&app, "POST", "/api/v1/books", Some(new_book("A", "T1", "S"))).await;
    send(&app, "POST", "/api/v1/books", Some(new_book("A", "T2", "S"))).await;
    send(&app, "POST", "/api/v1/books", Some(new_book("B", "T3", ""))).await;
    send(&app, "POST", "/api/v1/books", Some(new_book("B", "T4", ""))).await;
    send(&app, "POST", "/api/v1/read/A/T1", Some(json!({ "read": true }))).await;

    let (_, stats) = send(&app, "GET", "/api/v1/stats", None).await;
    assert_eq!(stats["total_books"], 4);
    assert_eq!(stats["read_books"], 1);
    assert_eq!(stats["read_percentage"], 25.0);
    assert_eq!(stats["books_by_genre"], json!({ "G": 4 }));
    assert_eq!(stats["books_by_author"], json!({ "A": 2, "B": 2 }));
    assert_eq!(stats["total_series"], 1);
    assert_eq!(
        stats["series_stats"],
        json!([{ "name": "S", "total_books": 2, "read_books": 1, "percentage": 50.0 }])
    );
}

#[tokio::test]
async fn test_library_file_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let app = test_app(&dir).await;
        send(&app, "POST", "/api/v1/books", Some(new_book("A", "T1", "S"))).await;
        send(&app, "POST", "/api/v1/quotes/A/T1", Some(json!({ "quote": "q" }))).await;
    }

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("library.json")).unwrap())
            .unwrap();
    assert_eq!(saved["books"][0]["quotes"], json!(["q"]));
    assert_eq!(saved["series"][0]["name"], "S");
    assert_eq!(saved["series"][0]["total"], 1);

    let app = test_app(&dir).await;
    let (status, body) = send(&app, "GET", "/api/v1/books/A/T1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"], "S");
    assert_eq!(body["quotes"], json!(["q"]));
}

#[tokio::test]
async fn test_malformed_library_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("library.json"), "[1, 2").unwrap();
    let storage = StorageConfig {
        path: dir.path().join("library.json"),
        pretty: true,
    };
    assert!(Repository::open(&storage).await.is_err());
}
