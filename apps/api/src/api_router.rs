use axum::Router;
use axum::routing::{get, post};
use taskgate_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let access_routes = Router::new()
        .route(
            "/api/access/routes",
            get(handlers::access::list_guarded_routes_handler),
        )
        .route(
            "/api/access/check",
            post(handlers::access::check_route_handler),
        )
        .route(
            "/api/access/permissions",
            post(handlers::access::check_permission_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(access_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
