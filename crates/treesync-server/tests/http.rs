use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use treesync_server::{create_router, seed, AppState};

fn app() -> axum::Router {
    let tree = seed::build_example_tree();
    create_router(AppState::new(tree))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn check_unknown_type_reports_error() {
    let (status, body) = get_json(app(), "/api/sync/node?type=bogus&pk=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_message"], "Unknown API call type.");
}

#[tokio::test]
async fn check_unknown_pk_reports_could_not_find() {
    let (_status, body) = get_json(app(), "/api/sync/node?type=check&pk=9999").await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_message"], "Could not find pk");
}

#[tokio::test]
async fn check_defaults_to_check_type() {
    let (_status, body) = get_json(app(), "/api/sync/node?pk=0").await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["0"].is_array());
}

#[tokio::test]
async fn check_returns_triples_for_multiple_pks() {
    let (_status, body) = get_json(app(), "/api/sync/node?type=check&pk=0&pk=1&pk=2").await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["0"].is_array());
    assert!(body["data"]["1"].is_array());
    assert!(body["data"]["2"].is_array());
}

#[tokio::test]
async fn fetch_includes_payload_data() {
    let (_status, body) = get_json(app(), "/api/sync/node?type=fetch&pk=1").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["1"]["data"]["category_name"], "CSE events");
}

#[tokio::test]
async fn check_children_reports_count() {
    let (_status, body) = get_json(app(), "/api/sync/node?type=check_children&pk=1").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["number_of_children"], 3);
}

#[tokio::test]
async fn get_parents_excludes_root() {
    let (_status, body) = get_json(app(), "/api/sync/node?type=get_parents&pk=3").await;
    assert_eq!(body["success"], true);
    let chain = body["data"]["3"].as_array().unwrap();
    assert!(chain.iter().all(|pk| pk.as_u64() != Some(0)));
}

#[tokio::test]
async fn since_defaults_missing_updated_time_to_zero() {
    let (_status, body) = get_json(app(), "/api/sync").await;
    assert_eq!(body["success"], true);
    // every node changed once, at startup seeding — since(0) must be non-empty
    assert!(body["data"].as_object().unwrap().len() > 0);
}

#[tokio::test]
async fn since_malformed_updated_time_falls_back_to_zero() {
    let (status, body) = get_json(app(), "/api/sync?updated_time=not-a-float").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get_json(app(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
