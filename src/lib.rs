//! Student Analysis Dashboard backend
//!
//! REST API over students, grades and stored predictions, a deterministic
//! risk scorer, and a thin proxy to the external ML prediction service.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logic;
pub mod middleware;
pub mod ml;
pub mod models;
pub mod repository;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};

use ml::PredictionService;
use repository::Repository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub ml: Arc<dyn PredictionService>,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/ml/model-metrics", get(handlers::ml::model_metrics))
        .route("/api/predictions/simulate", post(handlers::predictions::simulate));

    // User routes (JWT auth); teacher-only handlers check the role themselves
    let user_routes = Router::new()
        // Students
        .route("/api/students", get(handlers::students::list).post(handlers::students::create))
        .route(
            "/api/students/:id",
            get(handlers::students::get)
                .put(handlers::students::update)
                .delete(handlers::students::delete),
        )

        // Grades
        .route("/api/grades", get(handlers::grades::list).post(handlers::grades::create))
        .route(
            "/api/grades/:id",
            get(handlers::grades::get)
                .put(handlers::grades::update)
                .delete(handlers::grades::delete),
        )
        .route("/api/grades/student/:student_id", get(handlers::grades::list_for_student))

        // Predictions
        .route("/api/predictions", post(handlers::predictions::predict))
        .route("/api/predictions/save", post(handlers::predictions::save))
        .route("/api/predictions/latest/:student_id", get(handlers::predictions::latest))
        .route("/api/predictions/student/:student_id", get(handlers::predictions::history))
        .route("/api/predictions/risk", get(handlers::predictions::risk_roster))
        .route("/api/predictions/risk/:student_id", get(handlers::predictions::risk_for_student))

        // Analytics & reports
        .route("/api/analytics/class-average", get(handlers::analytics::class_average))
        .route("/api/reports/student/:student_id", get(handlers::reports::student_report))

        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_user_auth
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
