use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{ApiResponse, ListParams, Paginated, UpdateUserRequest, UserSummary},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// list_users
///
/// [Authenticated Route] Paginated account listing with an optional search over
/// name and email. Password digests never leave the repository boundary.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListParams),
    responses((status = 200, description = "Accounts page", body = [UserSummary]))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Paginated<UserSummary>>>, ApiError> {
    let page = params.page();
    let limit = params.limit_or(10);

    let (users, total) = state.repo.list_users(page, limit, params.search).await?;
    let summaries = users.iter().map(UserSummary::from).collect();

    Ok(Json(ApiResponse::ok(Paginated::new(
        summaries, total, page, limit,
    ))))
}

/// get_user
///
/// [Authenticated Route] Fetches a single account by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account", body = UserSummary),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserSummary>>, ApiError> {
    let user = state
        .repo
        .find_user_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(UserSummary::from(&user))))
}

/// update_user
///
/// [Admin Route] Partial update of an account. Only fields present in the
/// payload are touched; a payload with nothing to change is rejected rather
/// than silently succeeding.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = UserSummary),
        (status = 400, description = "Empty update"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserSummary>>, ApiError> {
    if payload.full_name.is_none() {
        return Err(ApiError::Validation("no fields to update".to_string()));
    }
    if let Some(name) = &payload.full_name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("full_name cannot be empty".to_string()));
        }
    }

    let user = state
        .repo
        .update_user(id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::with_message(
        "User updated",
        UserSummary::from(&user),
    )))
}

/// delete_user
///
/// [Admin Route] Removes an account. An administrator cannot delete their own
/// account through this endpoint; the guard compares the token identity against
/// the path id before storage is consulted.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Attempted self-delete"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if auth_user.id == id {
        return Err(ApiError::Forbidden);
    }

    if state.repo.delete_user(id).await? {
        Ok(Json(ApiResponse::message("User deleted")))
    } else {
        Err(ApiError::NotFound("User not found".to_string()))
    }
}
