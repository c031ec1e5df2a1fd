//! Tests for cmsquery-folders: listing client and browse sessions against an in-process folder service

use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use cmsquery_folders::*;
use serde_json::json;

async fn roots() -> impl IntoResponse {
    Json(json!({
        "entries": [
            {"id": "10", "name": "Sales", "type": "Folder"},
            {"id": "11", "name": "Finance", "type": "Folder"},
            {"id": "12", "name": "stray.rpt", "type": "Report"}
        ]
    }))
}

async fn children(Path(id): Path<String>) -> impl IntoResponse {
    let entries = match id.as_str() {
        "10" => json!([
            {"id": 20, "name": "Q1", "type": "Folder"},
            {"id": 21, "name": "summary", "type": "Report"}
        ]),
        "20" => json!([
            {"id": "30", "name": "january", "type": "Report"}
        ]),
        "11" => json!([]),
        _ => return (StatusCode::NOT_FOUND, "no such folder").into_response(),
    };
    Json(json!({ "entries": entries })).into_response()
}

async fn start() -> String {
    let app = Router::new()
        .route("/v1/folders/", get(roots))
        .route("/v1/folders/:id/children", get(children));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// ===========================================================================
// FolderClient
// ===========================================================================

#[tokio::test]
async fn list_roots_keeps_only_folders() {
    let client = FolderClient::new(start().await).unwrap();
    let roots = client.list_roots().await.unwrap();
    let names: Vec<&str> = roots.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Sales", "Finance"]);
}

#[tokio::test]
async fn list_children_returns_everything() {
    let client = FolderClient::new(format!("{}/", start().await)).unwrap();
    let entries = client.list_children("10").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "20");
    assert!(entries[0].is_folder());
    assert!(!entries[1].is_folder());
}

#[tokio::test]
async fn missing_folder_is_status_error() {
    let client = FolderClient::new(start().await).unwrap();
    let err = client.list_children("999").await.unwrap_err();
    assert!(matches!(err, FolderError::Status { status: 404, .. }));
}

// ===========================================================================
// FolderBrowser
// ===========================================================================

#[tokio::test]
async fn open_path_walks_by_name() {
    let mut browser = FolderBrowser::new(FolderClient::new(start().await).unwrap());
    let listing = browser.open_path("root/Sales/Q1").await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(browser.navigator().breadcrumb(), "root/Sales/Q1/");

    let paths: Vec<String> = browser.entry_paths().into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["root/Sales/Q1/january"]);
}

#[tokio::test]
async fn open_path_rejects_unknown_or_non_folder_names() {
    let mut browser = FolderBrowser::new(FolderClient::new(start().await).unwrap());
    assert!(matches!(
        browser.open_path("Sales/summary").await,
        Err(FolderError::NotFound(name)) if name == "summary"
    ));
    assert!(matches!(browser.open_path("").await, Err(FolderError::NotFound(_))));
}

#[tokio::test]
async fn go_up_reloads_parent_listing() {
    let mut browser = FolderBrowser::new(FolderClient::new(start().await).unwrap());
    browser.open_path("Sales/Q1").await.unwrap();
    assert!(browser.go_up().await.unwrap());
    assert_eq!(browser.navigator().breadcrumb(), "root/Sales/");
    assert_eq!(browser.listing().len(), 2);
    assert!(!browser.go_up().await.unwrap());
}

#[tokio::test]
async fn staging_and_finalizing_selections() {
    let mut browser = FolderBrowser::new(FolderClient::new(start().await).unwrap());
    browser.open_root("Sales").await.unwrap();

    assert_eq!(browser.stage("Q1", true).unwrap(), "root/Sales/Q1/");
    assert_eq!(browser.stage("summary", true).unwrap(), "root/Sales/summary");
    assert!(browser.stage("nope", true).is_err());
    browser.selection_mut().add_staged();

    // Opening another folder clears staged paths but keeps the final selection.
    browser.open_child("Q1").await.unwrap();
    assert_eq!(browser.selection().staged_len(), 0);
    let finalized: Vec<&str> = browser.selection().finalized().collect();
    assert_eq!(finalized, vec!["root/Sales/Q1/", "root/Sales/summary"]);
}
