use axum::{Router, extract::FromRef, http::HeaderName, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod storage;

// Routing segregation (public vs. token-protected surface).
pub mod routes;
use routes::{authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the binary entry point and tests.
pub use auth::{AuthUser, ROLE_NAMES};
pub use config::{AppConfig, Env};
pub use error::ApiError;
pub use repository::{PostgresRepository, Repository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// Auto-generates the OpenAPI document from every `#[utoipa::path]`-decorated
/// handler and every schema referenced in request/response bodies. The JSON is
/// served at `/api-docs/openapi.json` and rendered at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register, handlers::auth::login, handlers::auth::profile,
        handlers::auth::logout,
        handlers::users::list_users, handlers::users::get_user, handlers::users::update_user,
        handlers::users::delete_user,
        handlers::courses::list_courses, handlers::courses::get_course,
        handlers::courses::create_course, handlers::courses::update_course,
        handlers::courses::delete_course, handlers::courses::approve_course,
        handlers::courses::reject_course,
        handlers::posts::list_posts, handlers::posts::get_post, handlers::posts::create_post,
        handlers::posts::update_post, handlers::posts::delete_post,
        handlers::posts::approve_post, handlers::posts::reject_post,
        handlers::blog::list_blog_posts, handlers::blog::get_blog_post,
        handlers::blog::get_blog_post_by_slug,
        handlers::mentors::list_mentors, handlers::mentors::get_mentor,
        handlers::mentors::create_mentor, handlers::mentors::update_mentor,
        handlers::mentors::delete_mentor,
        handlers::programs::list_programs, handlers::programs::get_program,
        handlers::projects::list_projects, handlers::projects::get_project,
        handlers::projects::get_project_by_slug, handlers::projects::create_project,
        handlers::projects::update_project, handlers::projects::delete_project,
        handlers::dashboard::get_stats,
        handlers::upload::get_presigned_url,
    ),
    components(
        schemas(
            models::Role, models::Course, models::Post, models::Mentor, models::Program,
            models::Project, models::LoginRequest, models::RegisterRequest,
            models::UpdateUserRequest, models::CreateCourseRequest, models::CreatePostRequest,
            models::CreateMentorRequest, models::CreateProjectRequest,
            models::PresignedUrlRequest, models::PresignedUrlResponse,
            models::UserData, models::UserSummary, models::LoginData, models::DashboardStats,
        )
    ),
    tags(
        (name = "msc-admin-api", description = "Content administration API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container holding all shared services. Cloned per
/// request; every field is either `Arc`-backed or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: all persistence behind one trait object.
    pub repo: RepositoryState,
    /// Storage layer: presigned upload URL generation.
    pub storage: StorageState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// FromRef implementations let extractors pull individual services out of the
// shared state; the AuthUser extractor only needs AppConfig, for instance.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the full routing structure: documentation, the anonymous surface,
/// the token-protected surface (wrapped in the authentication gate), then the
/// observability and CORS layers outermost.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // The authentication gate rejects before any handler (or role gate)
        // runs, and stores the decoded identity as a typed request extension.
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::auth_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// Span factory for `TraceLayer`: tags every request span with the generated
/// x-request-id so all log lines for one request correlate.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
