use std::sync::Arc;

use axum::http::StatusCode;
use coachbook_db::mock::store::MockBookingStore;
use serde_json::{json, Value};

use crate::test_utils::{server_for, TestContext};

#[tokio::test]
async fn test_health_ok() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok", "storage": "ok" }));
}

#[tokio::test]
async fn test_health_reports_unreachable_storage() {
    let mut store = MockBookingStore::new();
    store
        .expect_ping()
        .times(1)
        .returning(|| Err(eyre::eyre!("pool timed out")));
    let server = server_for(Arc::new(store));

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["storage"], json!("unreachable"));
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/version").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "version": env!("CARGO_PKG_VERSION") })
    );
}
