//! Condominium Administration Service - Main Application Entry Point
//!
//! REST API backend for condominium administration: condominiums,
//! buildings, departments, parking spots, payments, expenses, and the
//! monthly common-fee (gasto común) billing cycle with arrears
//! reconciliation.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: API key with SHA-256 hashing
//! - **Tenancy**: per-operation membership checks against the owning
//!   condominium
//! - **Format**: JSON requests/responses; CSV export for period summaries
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod dates;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG controls the filter (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // Authenticated routes (everything except the health probe)
    let authenticated_routes = Router::new()
        // Condominium management
        .route(
            "/api/v1/condominiums",
            post(handlers::condominiums::create_condominium)
                .get(handlers::condominiums::list_condominiums),
        )
        .route(
            "/api/v1/condominiums/{id}",
            get(handlers::condominiums::get_condominium)
                .put(handlers::condominiums::update_condominium)
                .delete(handlers::condominiums::delete_condominium),
        )
        // Building management
        .route(
            "/api/v1/buildings",
            post(handlers::buildings::create_building).get(handlers::buildings::list_buildings),
        )
        .route(
            "/api/v1/buildings/{id}",
            get(handlers::buildings::get_building)
                .put(handlers::buildings::update_building)
                .delete(handlers::buildings::delete_building),
        )
        // Department management
        .route(
            "/api/v1/departments",
            post(handlers::departments::create_department)
                .get(handlers::departments::list_departments),
        )
        .route(
            "/api/v1/departments/{id}",
            get(handlers::departments::get_department)
                .put(handlers::departments::update_department)
                .delete(handlers::departments::delete_department),
        )
        // Parking spot management
        .route(
            "/api/v1/parking-spots",
            post(handlers::parking_spots::create_parking_spot)
                .get(handlers::parking_spots::list_parking_spots),
        )
        .route(
            "/api/v1/parking-spots/{id}",
            get(handlers::parking_spots::get_parking_spot)
                .put(handlers::parking_spots::update_parking_spot)
                .delete(handlers::parking_spots::delete_parking_spot),
        )
        // Payment recording
        .route(
            "/api/v1/payments",
            post(handlers::payments::create_payment).get(handlers::payments::list_payments),
        )
        .route(
            "/api/v1/payments/{id}",
            get(handlers::payments::get_payment)
                .put(handlers::payments::update_payment)
                .delete(handlers::payments::delete_payment),
        )
        // Expense recording
        .route(
            "/api/v1/expenses",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .route(
            "/api/v1/expenses/{id}",
            get(handlers::expenses::get_expense)
                .put(handlers::expenses::update_expense)
                .delete(handlers::expenses::delete_expense),
        )
        // Billing cycle and arrears
        .route("/api/v1/billing-periods", post(handlers::billing::open_period))
        .route(
            "/api/v1/billing-periods/summary",
            get(handlers::billing::get_summary_by_month),
        )
        .route(
            "/api/v1/billing-periods/{id}/status",
            put(handlers::billing::set_period_status),
        )
        .route(
            "/api/v1/billing-periods/{id}/charges",
            get(handlers::billing::list_period_charges),
        )
        .route(
            "/api/v1/billing-periods/{id}/summary",
            get(handlers::billing::get_period_summary),
        )
        .route(
            "/api/v1/billing-periods/{id}/summary.csv",
            get(handlers::billing::export_period_summary_csv),
        )
        .route(
            "/api/v1/buildings/{id}/departments/{department_id}/history",
            get(handlers::billing::get_department_history),
        )
        .route(
            "/api/v1/buildings/{id}/balance",
            get(handlers::billing::get_monthly_balance),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            pool.clone(),
            middleware::auth::auth_middleware,
        ));

    // Combine authenticated routes with public routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        // Share database pool with all handlers via State extraction
        .with_state(pool);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
