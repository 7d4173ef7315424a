use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, ListParams, Paginated, Post},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// list_blog_posts
///
/// [Public Route] The public blog feed. Only approved posts are visible here;
/// pending and rejected posts exist solely behind the admin listing.
#[utoipa::path(
    get,
    path = "/api/allblogposts",
    params(ListParams),
    responses((status = 200, description = "Approved posts page", body = [Post]))
)]
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Paginated<Post>>>, ApiError> {
    let page = params.page();
    let limit = params.limit_or(10);

    let (posts, total) = state.repo.list_blog_posts(page, limit).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(
        posts, total, page, limit,
    ))))
}

/// get_blog_post
///
/// [Public Route] Fetches one approved post by id. An existing but unapproved
/// post is indistinguishable from a missing one.
#[utoipa::path(
    get,
    path = "/api/allblogposts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Not found or not approved")
    )
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .repo
        .get_blog_post(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::ok(post)))
}

/// get_blog_post_by_slug
///
/// [Public Route] Slug-based lookup for the public site's article URLs.
#[utoipa::path(
    get,
    path = "/api/allblogposts/slug/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Not found or not approved")
    )
)]
pub async fn get_blog_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .repo
        .get_blog_post_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::ok(post)))
}
