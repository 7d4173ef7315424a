use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, CreatePostRequest, ListParams, Paginated, Post},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate(req: &CreatePostRequest) -> Result<(), ApiError> {
    if req.slug.trim().is_empty() || req.title.trim().is_empty() {
        return Err(ApiError::Validation(
            "slug and title are required".to_string(),
        ));
    }
    Ok(())
}

/// list_posts
///
/// [Authenticated Route] Paginated post listing for the admin panel. Includes
/// every moderation status; the public feed lives under /api/allblogposts.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(ListParams),
    responses((status = 200, description = "Posts page", body = [Post]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Paginated<Post>>>, ApiError> {
    let page = params.page();
    let limit = params.limit_or(10);

    let (posts, total) = state.repo.list_posts(page, limit, params.search).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(
        posts, total, page, limit,
    ))))
}

/// get_post
///
/// [Authenticated Route] Fetches a single post by id.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::ok(post)))
}

/// create_post
///
/// [Contributor Route] Submits a new post, starting in `pending` status unless
/// one is supplied.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Created", body = Post),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Duplicate slug")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    validate(&payload)?;
    let post = state.repo.create_post(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Post created", post)),
    ))
}

/// update_post
///
/// [Contributor Route] Replaces a post's content fields.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Updated", body = Post),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    validate(&payload)?;
    let post = state
        .repo
        .update_post(id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Post updated", post)))
}

/// delete_post
///
/// [Staff Route] Removes a post permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if state.repo.delete_post(id).await? {
        Ok(Json(ApiResponse::message("Post deleted")))
    } else {
        Err(ApiError::NotFound("Post not found".to_string()))
    }
}

/// approve_post
///
/// [Staff Route] Moderation: approves a post for the public blog feed.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/approve",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Approved", body = Post),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .repo
        .set_post_status(id, "approved")
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Post approved", post)))
}

/// reject_post
///
/// [Staff Route] Moderation: rejects a post, removing it from the public feed.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/reject",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Rejected", body = Post),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state
        .repo
        .set_post_status(id, "rejected")
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Post rejected", post)))
}
