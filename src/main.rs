use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use studiodesk::config::AppConfig;
use studiodesk::db;
use studiodesk::handlers;
use studiodesk::services::payment::simulated::SimulatedGateway;
use studiodesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    db::seed_catalog(&conn)?;

    let (changes_tx, _) = broadcast::channel(64);

    tracing::info!(
        delay_ms = config.payment_delay_ms,
        "using simulated payment gateway"
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        gateway: Box::new(SimulatedGateway::new(config.payment_delay_ms)),
        changes_tx,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings", get(handlers::bookings::get_bookings))
        .route(
            "/api/bookings/events",
            get(handlers::bookings::bookings_stream),
        )
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/:id/status",
            post(handlers::bookings::update_status),
        )
        .route("/api/equipment", get(handlers::equipment::get_equipment))
        .route(
            "/api/equipment/events",
            get(handlers::equipment::equipment_stream),
        )
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
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
