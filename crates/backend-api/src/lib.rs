mod docs;
mod error;
mod middleware;
mod state;
mod util;

pub mod routes;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse};
pub use middleware::logging_middleware;
pub use state::AppState;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        // Auth routes
        .route("/api/auth/signup", post(routes::auth::sign_up))
        .route("/api/auth/signin", post(routes::auth::sign_in))
        .route("/api/auth/me", get(routes::auth::current_user))
        // Class routes
        .route(
            "/api/classes",
            get(routes::classes::list_classes).post(routes::classes::create_class),
        )
        .route("/api/classes/join", post(routes::classes::join_class))
        .route("/api/classes/:class_id", get(routes::classes::get_class))
        .route(
            "/api/classes/:class_id/role",
            put(routes::classes::change_role),
        )
        .route(
            "/api/classes/:class_id/sessions",
            post(routes::classes::create_session),
        )
        // Profile routes
        .route(
            "/api/profile/tutor",
            get(routes::profile::tutor_gate).post(routes::profile::upgrade_to_tutor),
        )
        .route("/api/onboarding", post(routes::profile::onboard))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
