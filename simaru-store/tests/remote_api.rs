//! Integration tests for the remote store against a mock REST API.

use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use simaru_core::repository::{BookingRepository, RepoError, RoomRepository};
use simaru_store::RemoteStore;

const TOKEN: &str = "test-token-123";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

fn mock_api() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "budi@example.com" && body["password"] == "rahasia" {
                    Json(json!({
                        "accessToken": TOKEN,
                        "user": { "id": 1, "name": "Budi", "email": "budi@example.com" }
                    }))
                    .into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Invalid credentials" })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/rooms",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Unauthenticated" })),
                    )
                        .into_response();
                }
                Json(json!({
                    "data": [
                        { "id": 1, "name": "Room 101", "description": "Corner room", "capacity": 4, "status": "available" },
                        { "id": 2, "name": "Room 102", "description": "Back room", "capacity": 6, "available": false }
                    ]
                }))
                .into_response()
            })
            .post(|headers: HeaderMap, Json(_body): Json<Value>| async move {
                if !authorized(&headers) {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Unauthenticated" })),
                    )
                        .into_response();
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "database unavailable" })),
                )
                    .into_response()
            }),
        )
        .route(
            "/api/bookings",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if !authorized(&headers) {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Unauthenticated" })),
                    )
                        .into_response();
                }
                Json(json!({
                    "data": {
                        "id": 42,
                        "roomId": body["roomId"],
                        "bookingDate": body["bookingDate"],
                        "status": "Pending"
                    }
                }))
                .into_response()
            }),
        )
        .route(
            "/api/bookings/{id}",
            delete(|Path(_id): Path<u64>, headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Unauthenticated" })),
                    )
                        .into_response();
                }
                Json(json!({ "message": "Booking deleted" })).into_response()
            }),
        )
}

async fn spawn_mock_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_api()).await.unwrap();
    });
    format!("http://{addr}")
}

fn store(base_url: &str) -> RemoteStore {
    RemoteStore::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_login_then_list_rooms() {
    let base = spawn_mock_api().await;
    let store = store(&base);

    let session = store.login("budi@example.com", "rahasia").await.unwrap();
    assert!(session.is_logged_in());
    assert_eq!(session.token(), Some(TOKEN));

    let rooms = store.list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].name, "Room 101");
    // The legacy boolean shape in the payload still decodes.
    assert!(!rooms[1].status.is_available());
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let base = spawn_mock_api().await;
    let store = store(&base);

    let err = store.login("budi@example.com", "wrong").await.unwrap_err();
    match err {
        RepoError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_booking_returns_server_record() {
    let base = spawn_mock_api().await;
    let store = store(&base);
    store.login("budi@example.com", "rahasia").await.unwrap();

    let draft = simaru_domain::BookingDraft {
        room_id: Some(2),
        booking_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1),
        user: String::new(),
    };
    let booking = store.create_booking(&draft).await.unwrap();
    // The server-assigned id wins; the client never invents one.
    assert_eq!(booking.id, 42);
    assert_eq!(booking.room_id, 2);
}

#[tokio::test]
async fn test_failed_write_maps_to_api_error() {
    let base = spawn_mock_api().await;
    let store = store(&base);
    store.login("budi@example.com", "rahasia").await.unwrap();

    let err = store
        .create_room(&simaru_domain::RoomDraft {
            name: "Room 900".to_string(),
            description: "New wing".to_string(),
            capacity: 12,
            status: simaru_domain::RoomStatus::Available,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_delete_booking_checks_status_only() {
    let base = spawn_mock_api().await;
    let store = store(&base);
    store.login("budi@example.com", "rahasia").await.unwrap();

    store.delete_booking(7).await.unwrap();
}

#[tokio::test]
async fn test_stale_token_is_rejected_by_server() {
    let base = spawn_mock_api().await;
    let store = store(&base);
    store.set_session(simaru_core::session::Session::logged_in(
        "expired-token".to_string(),
        simaru_domain::AuthUser {
            id: 1,
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
        },
    ));

    let err = store.list_rooms().await.unwrap_err();
    assert!(matches!(err, RepoError::Api { status: 401, .. }));
}
