use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceExt;

use studiodesk::config::AppConfig;
use studiodesk::db;
use studiodesk::handlers;
use studiodesk::models::{Payment, PaymentStatus};
use studiodesk::services::payment::PaymentGateway;
use studiodesk::state::AppState;

// ── Mock Gateways ──

struct ApprovingGateway;

#[async_trait]
impl PaymentGateway for ApprovingGateway {
    async fn settle(&self, _payment: &Payment) -> anyhow::Result<PaymentStatus> {
        Ok(PaymentStatus::Completed)
    }
}

struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn settle(&self, _payment: &Payment) -> anyhow::Result<PaymentStatus> {
        Ok(PaymentStatus::Failed)
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        payment_delay_ms: 0,
    }
}

fn test_state_with_gateway(gateway: Box<dyn PaymentGateway>) -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    db::seed_catalog(&conn).unwrap();
    let (changes_tx, _) = tokio::sync::broadcast::channel(64);
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: test_config(),
        gateway,
        changes_tx,
    })
}

fn test_state() -> Arc<AppState> {
    test_state_with_gateway(Box::new(ApprovingGateway))
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings", get(handlers::bookings::get_bookings))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/:id/status",
            post(handlers::bookings::update_status),
        )
        .route("/api/equipment", get(handlers::equipment::get_equipment))
        .route("/api/payments", post(handlers::payments::process_payment))
        .route("/api/payments", get(handlers::payments::get_payments))
        .route("/api/users", post(handlers::users::register_user))
        .route("/api/users/:id", get(handlers::users::get_user))
        .route(
            "/api/users/:id/dashboard",
            get(handlers::users::get_dashboard),
        )
        .route("/api/users/:id/settings", get(handlers::users::get_settings))
        .route(
            "/api/users/:id/settings",
            put(handlers::users::update_settings),
        )
        .route("/api/admin/dashboard", get(handlers::admin::get_dashboard))
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route("/api/admin/reports", get(handlers::admin::get_report))
        .route("/api/admin/config", get(handlers::admin::get_config))
        .route("/api/admin/config", put(handlers::admin::update_config))
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route(
            "/api/admin/users/:id/role",
            post(handlers::admin::update_user_role),
        )
        .route(
            "/api/admin/users/:id/status",
            post(handlers::admin::update_user_status),
        )
        .route("/api/admin/clients", get(handlers::admin::list_clients))
        .route(
            "/api/admin/equipment/maintenance",
            get(handlers::admin::maintenance_due),
        )
        .route(
            "/api/admin/equipment/:id/availability",
            post(handlers::admin::set_equipment_availability),
        )
        .with_state(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", "Bearer test-token");
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn booking_request(studio: &str, start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "client_id": "client-001",
        "client_name": "John Doe",
        "studio": studio,
        "date": 1_750_000_000_000i64,
        "start_time": start,
        "end_time": end,
        "equipment_ids": ["eq-001", "eq-002"]
    })
}

async fn create_booking(state: &Arc<AppState>, studio: &str, start: &str, end: &str) -> serde_json::Value {
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            booking_request(studio, start, end),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

// ── Booking Creation ──

#[tokio::test]
async fn test_create_booking_prices_from_catalog() {
    let state = test_state();
    let booking = create_booking(&state, "STUDIO_A", "10:00", "14:00").await;

    // (50 + 75) per hour over 4 hours
    assert_eq!(booking["total_hours"], 4);
    assert_eq!(booking["total_amount"], 500.0);
    assert_eq!(booking["status"], "PENDING");
    assert_eq!(booking["studio"], "STUDIO_A");
    assert_eq!(booking["equipment"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_created_booking_round_trips_by_id() {
    let state = test_state();
    let created = create_booking(&state, "STUDIO_B", "09:00", "12:00").await;
    let id = created["id"].as_str().unwrap();

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/bookings/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let loaded = body_json(res).await;
    assert_eq!(loaded["id"], created["id"]);
    assert_eq!(loaded["studio"], created["studio"]);
    assert_eq!(loaded["start_time"], created["start_time"]);
    assert_eq!(loaded["end_time"], created["end_time"]);
    assert_eq!(loaded["total_amount"], created["total_amount"]);
    assert_eq!(loaded["status"], created["status"]);
}

#[tokio::test]
async fn test_create_booking_unknown_equipment_rejected() {
    let state = test_state();
    let mut body = booking_request("STUDIO_A", "10:00", "12:00");
    body["equipment_ids"] = serde_json::json!(["eq-999"]);

    let app = test_app(state);
    let res = app
        .oneshot(json_request("POST", "/api/bookings", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_double_booking_same_slot_rejected() {
    let state = test_state();
    create_booking(&state, "STUDIO_A", "10:00", "14:00").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            booking_request("STUDIO_A", "12:00", "16:00"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Back-to-back slots are fine
    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            booking_request("STUDIO_A", "14:00", "16:00"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bookings_list_filters_by_client() {
    let state = test_state();
    create_booking(&state, "STUDIO_A", "10:00", "12:00").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings?client_id=client-001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings?client_id=someone-else")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = body_json(res).await;
    assert!(list.as_array().unwrap().is_empty());
}

// ── Status Lifecycle ──

#[tokio::test]
async fn test_status_transitions_enforced() {
    let state = test_state();
    let booking = create_booking(&state, "STUDIO_A", "10:00", "12:00").await;
    let id = booking["id"].as_str().unwrap();

    // PENDING → CONFIRMED
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            serde_json::json!({"status": "CONFIRMED"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "CONFIRMED");

    // CONFIRMED → CONFIRMED is an idempotent success
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            serde_json::json!({"status": "CONFIRMED"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "CONFIRMED");

    // CONFIRMED → COMPLETED skips IN_PROGRESS and is rejected
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            serde_json::json!({"status": "COMPLETED"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The stored status is untouched by the rejected update
    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/bookings/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(res).await["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_status_update_unknown_booking() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(json_request(
            "POST",
            "/api/bookings/nope/status",
            serde_json::json!({"status": "CONFIRMED"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── Equipment ──

#[tokio::test]
async fn test_equipment_catalog_is_seeded() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/equipment")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let items = body_json(res).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 5);
    // name-ascending ordering
    assert_eq!(items[0]["name"], "ARRI Alexa Mini");
    assert_eq!(items[0]["is_available"], false);
}

#[tokio::test]
async fn test_equipment_availability_toggle_requires_admin() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/admin/equipment/eq-003/availability",
            serde_json::json!({"is_available": true}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/equipment/eq-003/availability",
            Some(serde_json::json!({"is_available": true})),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/equipment")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let items = body_json(res).await;
    let arri = items
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"] == "eq-003")
        .unwrap()
        .clone();
    assert_eq!(arri["is_available"], true);
}

// ── Payments ──

fn payment_request(booking_id: &str, method: &str, card: Option<serde_json::Value>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "booking_id": booking_id,
        "payment_method": method,
    });
    if let Some(card) = card {
        body["card"] = card;
    }
    body
}

fn valid_card() -> serde_json::Value {
    serde_json::json!({
        "card_number": "4111111111111111",
        "expiry_date": "12/25",
        "cvv": "123",
        "card_holder": "Jane Doe"
    })
}

#[tokio::test]
async fn test_payment_completes_and_is_recorded() {
    let state = test_state();
    let booking = create_booking(&state, "STUDIO_A", "10:00", "14:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/payments",
            payment_request(id, "CREDIT_CARD", Some(valid_card())),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let payment = body_json(res).await;
    assert_eq!(payment["status"], "COMPLETED");
    assert_eq!(payment["amount"], 500.0);
    assert_eq!(payment["booking_id"], id);
    assert!(payment["processed_at"].as_i64().unwrap() > 0);
    assert!(payment["transaction_id"].as_str().unwrap().starts_with("TXN"));

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/payments?client_id=client-001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["status"], "COMPLETED");
}

#[tokio::test]
async fn test_declined_payment_reports_failed() {
    let state = test_state_with_gateway(Box::new(DecliningGateway));
    let booking = create_booking(&state, "STUDIO_A", "10:00", "14:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/payments",
            payment_request(id, "CASH", None),
        ))
        .await
        .unwrap();

    // A decline is still a resolved payment, not a transport error
    assert_eq!(res.status(), StatusCode::OK);
    let payment = body_json(res).await;
    assert_eq!(payment["status"], "FAILED");
    assert!(payment["processed_at"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_invalid_card_short_circuits() {
    let state = test_state();
    let booking = create_booking(&state, "STUDIO_A", "10:00", "14:00").await;
    let id = booking["id"].as_str().unwrap();

    let card = serde_json::json!({
        "card_number": "411111111111111",
        "expiry_date": "12/25",
        "cvv": "123",
        "card_holder": "Jane Doe"
    });

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/payments",
            payment_request(id, "CREDIT_CARD", Some(card)),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was persisted for the failed validation
    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/payments?client_id=client-001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(body_json(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_card_not_required_for_cash() {
    let state = test_state();
    let booking = create_booking(&state, "STUDIO_A", "10:00", "14:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/payments",
            payment_request(id, "CASH", None),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_payment_for_unknown_booking() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(json_request(
            "POST",
            "/api/payments",
            payment_request("nope", "CASH", None),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── Users & Roles ──

#[tokio::test]
async fn test_register_and_dashboard_dispatch() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({
                "id": "user-ext-1",
                "email": "client@example.com",
                "full_name": "Sarah Professional",
                "phone": "+1234567892"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let user = body_json(res).await;
    assert_eq!(user["role"], "CLIENT");
    assert_eq!(user["is_active"], true);

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/users/user-ext-1/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let dashboard = body_json(res).await;
    assert_eq!(dashboard["dashboard"], "client");
    let actions = dashboard["actions"].as_array().unwrap();
    assert!(actions.contains(&serde_json::json!("create_booking")));
    assert!(!actions.contains(&serde_json::json!("manage_users")));

    // Promote to admin, dispatch follows the role
    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/users/user-ext-1/role",
            Some(serde_json::json!({"role": "ADMIN"})),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/users/user-ext-1/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let dashboard = body_json(res).await;
    assert_eq!(dashboard["dashboard"], "admin");
    assert!(dashboard["actions"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("manage_users")));
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let state = test_state();

    let register = serde_json::json!({
        "email": "dup@example.com",
        "full_name": "First User"
    });

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request("POST", "/api/users", register.clone()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(json_request("POST", "/api/users", register))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_registration_respects_config_switch() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "PUT",
            "/api/admin/config",
            Some(serde_json::json!({"allow_new_registrations": false})),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"email": "late@example.com", "full_name": "Too Late"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invalid_registration_fields() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"email": "not-an-email", "full_name": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"email": "a@example.com", "full_name": "   "}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Settings ──

#[tokio::test]
async fn test_settings_default_then_round_trip() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/users/u-1/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let defaults = body_json(res).await;
    assert_eq!(defaults["push_notifications"], true);
    assert_eq!(defaults["dark_mode"], false);
    assert_eq!(defaults["language"], "en-US");

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "PUT",
            "/api/users/u-1/settings",
            serde_json::json!({"dark_mode": true, "sms_notifications": true}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/users/u-1/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let saved = body_json(res).await;
    assert_eq!(saved["dark_mode"], true);
    assert_eq!(saved["sms_notifications"], true);
    assert_eq!(saved["language"], "en-US");
}

// ── Admin: auth, dashboard, reports, config ──

#[tokio::test]
async fn test_admin_requires_auth() {
    let state = test_state();

    for uri in [
        "/api/admin/dashboard",
        "/api/admin/stats",
        "/api/admin/users",
        "/api/admin/clients",
        "/api/admin/config",
        "/api/admin/equipment/maintenance",
    ] {
        let app = test_app(state.clone());
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "open access to {uri}");
    }

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/dashboard")
                .header("Authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_dashboard_reflects_bookings() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request("GET", "/api/admin/dashboard", None))
        .await
        .unwrap();
    let empty = body_json(res).await;
    assert_eq!(empty["total_bookings"], 0);
    assert_eq!(empty["available_equipment"], 4);

    create_booking(&state, "STUDIO_A", "10:00", "14:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(admin_request("GET", "/api/admin/dashboard", None))
        .await
        .unwrap();
    let summary = body_json(res).await;
    assert_eq!(summary["total_bookings"], 1);
}

#[tokio::test]
async fn test_admin_stats_counts_pending() {
    let state = test_state();
    create_booking(&state, "STUDIO_A", "10:00", "14:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(admin_request("GET", "/api/admin/stats", None))
        .await
        .unwrap();
    let stats = body_json(res).await;
    assert_eq!(stats["pending_bookings"], 1);
    assert_eq!(stats["completed_today"], 0);
}

#[tokio::test]
async fn test_reports_by_kind() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "GET",
            "/api/admin/reports?kind=booking_analytics&range=last_7_days",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report = body_json(res).await;
    assert_eq!(report["total_bookings"], 0);
    assert_eq!(report["cancellation_rate"], 0.0);

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request("GET", "/api/admin/reports?kind=revenue", None))
        .await
        .unwrap();
    let report = body_json(res).await;
    assert_eq!(report["total_revenue"], 0.0);
    assert_eq!(report["most_profitable_studio"], "N/A");

    let app = test_app(state);
    let res = app
        .oneshot(admin_request("GET", "/api/admin/reports?kind=nonsense", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_admin_config_round_trip() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request("GET", "/api/admin/config", None))
        .await
        .unwrap();
    let defaults = body_json(res).await;
    assert_eq!(defaults["max_booking_hours"], 8);
    assert_eq!(defaults["allow_new_registrations"], true);

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "PUT",
            "/api/admin/config",
            Some(serde_json::json!({"max_booking_hours": 12, "maintenance_mode": true})),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(admin_request("GET", "/api/admin/config", None))
        .await
        .unwrap();
    let saved = body_json(res).await;
    assert_eq!(saved["max_booking_hours"], 12);
    assert_eq!(saved["maintenance_mode"], true);
    // untouched switches come back as defaults
    assert_eq!(saved["security_deposit"], 100.0);
}

#[tokio::test]
async fn test_admin_clients_listing_and_deactivation() {
    let state = test_state();

    for (id, email, name) in [
        ("c-1", "ann@example.com", "Ann Director"),
        ("c-2", "bob@example.com", "Bob Producer"),
    ] {
        let app = test_app(state.clone());
        let res = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                serde_json::json!({"id": id, "email": email, "full_name": name}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request("GET", "/api/admin/clients", None))
        .await
        .unwrap();
    let clients = body_json(res).await;
    assert_eq!(clients.as_array().unwrap().len(), 2);
    // full_name ascending
    assert_eq!(clients[0]["full_name"], "Ann Director");

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request("GET", "/api/admin/clients?search=bob", None))
        .await
        .unwrap();
    let hits = body_json(res).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["id"], "c-2");

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/users/c-1/status",
            Some(serde_json::json!({"is_active": false})),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/users/c-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(res).await["is_active"], false);
}
