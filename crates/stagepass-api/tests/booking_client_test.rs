#![allow(clippy::unwrap_used)]
// Integration tests for `BookingClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stagepass_api::{BookingClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BookingClient, SecretString) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = BookingClient::with_client(reqwest::Client::new(), base_url);
    let token: SecretString = "test-token".to_string().into();
    (server, client, token)
}

fn booking_json(booking_id: &str, status: &str) -> serde_json::Value {
    json!({
        "bookingId": booking_id,
        "customerName": "Asha Rao",
        "email": "asha@example.com",
        "phone": "+91-98450-12345",
        "eventName": "Spring Gala",
        "eventDate": "2026-09-12T19:30:00Z",
        "ticketType": "Balcony",
        "pricePerTicket": 400.0,
        "numberOfTickets": 2,
        "totalPrice": 800.0,
        "status": status,
        "createdAt": "2026-08-01T08:15:00Z"
    })
}

// ── List tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_pending() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings/pending"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookings": [booking_json("BK-1001", "pending_payment")]
        })))
        .mount(&server)
        .await;

    let bookings = client.list_pending(&token).await.unwrap();

    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].booking_id, "BK-1001");
    assert_eq!(bookings[0].customer_name, "Asha Rao");
    assert_eq!(bookings[0].status, "pending_payment");
    assert_eq!(bookings[0].number_of_tickets, 2);
    assert!(bookings[0].ticket_id.is_none());
    assert!(bookings[0].used_at.is_none());
}

#[tokio::test]
async fn test_list_all_includes_used_fields() {
    let (server, client, token) = setup().await;

    let mut used = booking_json("BK-0042", "used");
    used["ticketId"] = json!("TK-0042-A");
    used["usedAt"] = json!("2026-08-02T18:05:00Z");

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "bookings": [used] })),
        )
        .mount(&server)
        .await;

    let bookings = client.list_all(&token).await.unwrap();

    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].ticket_id.as_deref(), Some("TK-0042-A"));
    assert!(bookings[0].used_at.is_some());
}

// ── Action tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_approve_posts_to_booking_path() {
    let (server, client, token) = setup().await;

    Mock::given(method("POST"))
        .and(path("/bookings/approve/BK-1001"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Booking approved and ticket issued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = client.approve(&token, "BK-1001").await.unwrap();
    assert_eq!(message, "Booking approved and ticket issued");
}

#[tokio::test]
async fn test_reject_surfaces_server_error_text() {
    let (server, client, token) = setup().await;

    Mock::given(method("POST"))
        .and(path("/bookings/reject/BK-1001"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "Booking already resolved"
        })))
        .mount(&server)
        .await;

    let result = client.reject(&token, "BK-1001").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "Booking already resolved");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_mark_used() {
    let (server, client, token) = setup().await;

    Mock::given(method("POST"))
        .and(path("/bookings/mark-used/BK-0042"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Ticket marked as used"
        })))
        .mount(&server)
        .await;

    let message = client.mark_used(&token, "BK-0042").await.unwrap();
    assert_eq!(message, "Ticket marked as used");
}

// ── Auth tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_401() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid or expired token"
        })))
        .mount(&server)
        .await;

    let result = client.list_pending(&token).await;

    match &result {
        Err(Error::Unauthorized { status, message }) => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid or expired token");
        }
        other => panic!("expected Unauthorized error, got: {other:?}"),
    }
    assert!(result.unwrap_err().is_auth_expired());
}

#[tokio::test]
async fn test_forbidden_maps_403() {
    let (server, client, token) = setup().await;

    Mock::given(method("POST"))
        .and(path("/bookings/approve/BK-1001"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.approve(&token, "BK-1001").await;

    assert!(
        matches!(result, Err(Error::Unauthorized { status: 403, .. })),
        "expected Unauthorized error, got: {result:?}"
    );
}

// ── Error-shape tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_error_without_body_falls_back_to_status() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_all(&token).await;

    match result {
        Err(Error::Api { status: 500, ref message }) => {
            assert!(message.contains("500"), "expected fallback text, got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_pending(&token).await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "not json");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
