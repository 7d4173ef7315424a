use crate::{
    AppState, auth,
    error::ApiError,
    handlers::{auth as session, courses, dashboard, mentors, posts, projects, upload, users},
};
use axum::{
    Router,
    extract::Request,
    handler::Handler,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};

// Role allow-lists, fixed at compile time. Matching is exact: "admin" confers
// nothing on a route that only lists "editor".
const ADMIN: &[&str] = &["admin"];
const STAFF: &[&str] = &["admin", "editor"];
const CONTRIBUTORS: &[&str] = &["admin", "editor", "partner"];

// Named gate functions so they can be used with `middleware::from_fn`, which
// needs a `Clone` handler (fn items are).
async fn admin_only(request: Request, next: Next) -> Result<Response, ApiError> {
    auth::authorize(ADMIN, request, next).await
}

async fn staff_only(request: Request, next: Next) -> Result<Response, ApiError> {
    auth::authorize(STAFF, request, next).await
}

async fn contributors_only(request: Request, next: Next) -> Result<Response, ApiError> {
    auth::authorize(CONTRIBUTORS, request, next).await
}

/// authenticated_routes
///
/// Every route here sits behind the authentication gate applied in
/// `create_router`. Role gates are attached per handler with `Handler::layer`,
/// so methods sharing a path can carry different allow-lists; a GET that names
/// no gate is open to any authenticated principal.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // Session
        .route("/api/auth/logout", post(session::logout))
        .route("/api/auth/profile", get(session::profile))
        // Accounts: reads for any principal, writes admin-only
        .route("/api/v1/users", get(users::list_users))
        .route(
            "/api/v1/users/{id}",
            get(users::get_user)
                .put(users::update_user.layer(middleware::from_fn(admin_only)))
                .delete(users::delete_user.layer(middleware::from_fn(admin_only))),
        )
        // Courses: contributors submit and edit, staff moderate and delete
        .route(
            "/api/v1/courses",
            get(courses::list_courses)
                .post(courses::create_course.layer(middleware::from_fn(contributors_only))),
        )
        .route(
            "/api/v1/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course.layer(middleware::from_fn(contributors_only)))
                .delete(courses::delete_course.layer(middleware::from_fn(staff_only))),
        )
        .route(
            "/api/v1/courses/{id}/approve",
            patch(courses::approve_course.layer(middleware::from_fn(staff_only))),
        )
        .route(
            "/api/v1/courses/{id}/reject",
            patch(courses::reject_course.layer(middleware::from_fn(staff_only))),
        )
        // Posts: same lifecycle as courses
        .route(
            "/api/v1/posts",
            get(posts::list_posts)
                .post(posts::create_post.layer(middleware::from_fn(contributors_only))),
        )
        .route(
            "/api/v1/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post.layer(middleware::from_fn(contributors_only)))
                .delete(posts::delete_post.layer(middleware::from_fn(staff_only))),
        )
        .route(
            "/api/v1/posts/{id}/approve",
            patch(posts::approve_post.layer(middleware::from_fn(staff_only))),
        )
        .route(
            "/api/v1/posts/{id}/reject",
            patch(posts::reject_post.layer(middleware::from_fn(staff_only))),
        )
        // Mentors: staff-managed
        .route(
            "/api/v1/mentors",
            get(mentors::list_mentors)
                .post(mentors::create_mentor.layer(middleware::from_fn(staff_only))),
        )
        .route(
            "/api/v1/mentors/{id}",
            get(mentors::get_mentor)
                .put(mentors::update_mentor.layer(middleware::from_fn(staff_only)))
                .delete(mentors::delete_mentor.layer(middleware::from_fn(staff_only))),
        )
        // Projects: the same reads as the public surface plus staff writes
        .route(
            "/api/v1/projects",
            get(projects::list_projects)
                .post(projects::create_project.layer(middleware::from_fn(staff_only))),
        )
        .route(
            "/api/v1/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project.layer(middleware::from_fn(staff_only)))
                .delete(projects::delete_project.layer(middleware::from_fn(staff_only))),
        )
        // Dashboard
        .route(
            "/api/v1/dashboard/stats",
            get(dashboard::get_stats.layer(middleware::from_fn(staff_only))),
        )
        // Media pipeline
        .route("/api/v1/upload", post(upload::get_presigned_url))
}
