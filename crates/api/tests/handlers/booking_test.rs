use std::{future::IntoFuture, sync::Arc};

use axum::http::StatusCode;
use coachbook_core::{
    models::booking::{BookingFilter, BookingResponse},
    store::BookingStore,
};
use coachbook_db::mock::store::MockBookingStore;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{create_body, server_for, TestContext};

#[tokio::test]
async fn test_create_booking_success() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&create_body(5, "2024-06-01", "09:00-10:00"))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Booking created successfully" })
    );

    let stored = ctx.store.list(&BookingFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].client_info, "Alice");
}

#[tokio::test]
async fn test_adjacent_booking_is_accepted() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&create_body(5, "2024-06-01", "09:00-10:00"))
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .post("/api/bookings")
        .json(&create_body(5, "2024-06-01", "10:00-11:00"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_overlapping_booking_is_conflict() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&create_body(5, "2024-06-01", "09:00-10:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&create_body(5, "2024-06-01", "09:30-10:30"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("already booked"));
}

#[rstest]
#[case("2024-13-01")]
#[case("2024-6-1")]
#[case(" 2024-06-01")]
#[case("+2024-06-01")]
#[tokio::test]
async fn test_invalid_date_is_bad_request(#[case] date: &str) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&create_body(5, date, "09:00-10:00"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("Invalid date format"));
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({ "student_name": "Alice", "coach_id": 5 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.store.list(&BookingFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_overlapping_requests_admit_one() {
    let ctx = TestContext::new();

    let (first, second) = tokio::join!(
        ctx.server
            .post("/api/bookings")
            .json(&create_body(5, "2024-06-01", "09:00-10:00"))
            .into_future(),
        ctx.server
            .post("/api/bookings")
            .json(&create_body(5, "2024-06-01", "09:45-11:00"))
            .into_future(),
    );

    let mut statuses = vec![first.status_code().as_u16(), second.status_code().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![201, 409]);
}

#[tokio::test]
async fn test_list_bookings_wire_format_and_filters() {
    let ctx = TestContext::new();
    for (coach_id, date) in [(5, "2024-06-01"), (5, "2024-06-02"), (6, "2024-06-01")] {
        ctx.server
            .post("/api/bookings")
            .json(&create_body(coach_id, date, "09:00-10:00"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all = ctx.server.get("/api/bookings").await;
    all.assert_status_ok();
    assert_eq!(all.json::<Vec<BookingResponse>>().len(), 3);

    let keyed = ctx
        .server
        .get("/api/bookings")
        .add_query_param("coach_id", 5)
        .add_query_param("date", "2024-06-02")
        .await;
    keyed.assert_status_ok();
    let keyed = keyed.json::<Value>();
    let rows = keyed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["coach_id"], json!(5));
    assert_eq!(rows[0]["date"], json!("2024-06-02"));
    assert_eq!(rows[0]["time_slots"], json!("09:00-10:00"));
    assert_eq!(rows[0]["student_name"], json!("Alice"));
    assert!(rows[0]["id"].is_string());

    let by_date = ctx
        .server
        .get("/api/bookings")
        .add_query_param("date", "2024-06-01")
        .await;
    by_date.assert_status_ok();
    assert_eq!(by_date.json::<Vec<BookingResponse>>().len(), 2);
}

#[tokio::test]
async fn test_list_with_non_numeric_coach_is_bad_request() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/bookings")
        .add_query_param("coach_id", "five")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// Updates skip the overlap check, so this update into an occupied range is
// expected to succeed.
#[tokio::test]
async fn test_update_into_overlap_succeeds() {
    let ctx = TestContext::new();
    for slots in ["09:00-10:00", "11:00-12:00"] {
        ctx.server
            .post("/api/bookings")
            .json(&create_body(5, "2024-06-01", slots))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let later = ctx
        .server
        .get("/api/bookings")
        .await
        .json::<Vec<BookingResponse>>()
        .into_iter()
        .find(|b| b.time_slots == "11:00-12:00")
        .unwrap();

    let response = ctx
        .server
        .put(&format!("/api/bookings/{}", later.id))
        .json(&json!({ "time_slots": "09:30-10:30", "student_name": "" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Booking updated successfully" })
    );

    let stored = ctx.store.get(later.id).await.unwrap().unwrap();
    assert_eq!(stored.time_slots, "09:30-10:30");
    assert_eq!(stored.client_info, "Alice");
}

#[tokio::test]
async fn test_update_unknown_booking_is_not_found() {
    let ctx = TestContext::new();

    ctx.server
        .put(&format!("/api/bookings/{}", uuid::Uuid::new_v4()))
        .json(&json!({ "student_name": "Bob" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_booking_id_is_bad_request() {
    let ctx = TestContext::new();

    ctx.server
        .put("/api/bookings/42")
        .json(&json!({ "student_name": "Bob" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_booking_and_unknown_id() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&create_body(5, "2024-06-01", "09:00-10:00"))
        .await
        .assert_status(StatusCode::CREATED);
    let id = ctx.store.list(&BookingFilter::default()).await.unwrap()[0].id;

    let response = ctx.server.delete(&format!("/api/bookings/{id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Booking deleted successfully" })
    );
    assert!(ctx.store.get(id).await.unwrap().is_none());

    // Deleting again is indistinguishable from success.
    ctx.server
        .delete(&format!("/api/bookings/{id}"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let mut store = MockBookingStore::new();
    store
        .expect_delete()
        .times(1)
        .returning(|_| Err(eyre::eyre!("connection reset")));
    let server = server_for(Arc::new(store));

    let response = server
        .delete(&format!("/api/bookings/{}", uuid::Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Storage error"));
}
