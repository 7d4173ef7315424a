use crate::{
    AppState,
    handlers::{auth, blog, programs, projects},
    models::ApiResponse,
};
use axum::{
    Json, Router,
    routing::{get, post},
};

/// Liveness probe for deployment health checks.
async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("ok"))
}

async fn ping() -> &'static str {
    "pong"
}

/// public_routes
///
/// Everything reachable without a token: probes, the credential endpoints, and
/// the read-only listings consumed by the public site. Note the blog feed only
/// ever surfaces approved posts; the unfiltered listing lives behind
/// authentication under /api/v1/posts.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/allblogposts", get(blog::list_blog_posts))
        .route("/api/allblogposts/slug/{slug}", get(blog::get_blog_post_by_slug))
        .route("/api/allblogposts/{id}", get(blog::get_blog_post))
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/slug/{slug}", get(projects::get_project_by_slug))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/api/programs", get(programs::list_programs))
        .route("/api/programs/{id}", get(programs::get_program))
}
