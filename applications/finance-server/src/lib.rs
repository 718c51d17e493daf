//! Campus Finance Server Library
//!
//! School finance API: staff accounts, students, academic years, annual fees
//! and the transaction ledger, behind password login and bearer tokens.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use crate::config::FinanceConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the HTTP router
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(api::health::root))
        .route("/health", get(api::health::health))
        .route("/signup", post(api::auth::signup))
        .route("/login", post(api::auth::login));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Ledger
        .route(
            "/transactions/fee-payment",
            post(api::transactions::record_fee_payment),
        )
        .route("/transactions", post(api::transactions::record_transaction))
        .route("/transactions/history", get(api::transactions::history))
        // Students
        .route("/students", post(api::students::create_student))
        .route("/students", get(api::students::list_students))
        .route("/students/:id/details", get(api::students::student_details))
        .route("/students/:id/fees", post(api::students::assign_annual_fee))
        .route(
            "/students/:id/fee-summary/:year_id",
            get(api::students::fee_summary),
        )
        // Academic years
        .route("/academic-years", post(api::academic_years::create_year))
        .route("/academic-years", get(api::academic_years::list_years))
        .route(
            "/academic-years/:id/current",
            put(api::academic_years::set_current_year),
        )
        // Staff
        .route("/users", get(api::users::list_users))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    public_routes
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
