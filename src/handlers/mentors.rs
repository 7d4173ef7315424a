use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, CreateMentorRequest, ListParams, Mentor, Paginated},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate(req: &CreateMentorRequest) -> Result<(), ApiError> {
    if req.slug.trim().is_empty() || req.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "slug and name are required".to_string(),
        ));
    }
    Ok(())
}

/// list_mentors
///
/// [Authenticated Route] Paginated mentor listing with optional name search.
#[utoipa::path(
    get,
    path = "/api/v1/mentors",
    params(ListParams),
    responses((status = 200, description = "Mentors page", body = [Mentor]))
)]
pub async fn list_mentors(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Paginated<Mentor>>>, ApiError> {
    let page = params.page();
    let limit = params.limit_or(10);

    let (mentors, total) = state.repo.list_mentors(page, limit, params.search).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(
        mentors, total, page, limit,
    ))))
}

/// get_mentor
///
/// [Authenticated Route] Fetches a single mentor profile by id.
#[utoipa::path(
    get,
    path = "/api/v1/mentors/{id}",
    params(("id" = Uuid, Path, description = "Mentor ID")),
    responses(
        (status = 200, description = "Mentor", body = Mentor),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_mentor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Mentor>>, ApiError> {
    let mentor = state
        .repo
        .get_mentor(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentor not found".to_string()))?;

    Ok(Json(ApiResponse::ok(mentor)))
}

/// create_mentor
///
/// [Staff Route] Adds a mentor profile.
#[utoipa::path(
    post,
    path = "/api/v1/mentors",
    request_body = CreateMentorRequest,
    responses(
        (status = 201, description = "Created", body = Mentor),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Duplicate slug")
    )
)]
pub async fn create_mentor(
    State(state): State<AppState>,
    Json(payload): Json<CreateMentorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Mentor>>), ApiError> {
    validate(&payload)?;
    let mentor = state.repo.create_mentor(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Mentor created", mentor)),
    ))
}

/// update_mentor
///
/// [Staff Route] Replaces a mentor profile.
#[utoipa::path(
    put,
    path = "/api/v1/mentors/{id}",
    params(("id" = Uuid, Path, description = "Mentor ID")),
    request_body = CreateMentorRequest,
    responses(
        (status = 200, description = "Updated", body = Mentor),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_mentor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateMentorRequest>,
) -> Result<Json<ApiResponse<Mentor>>, ApiError> {
    validate(&payload)?;
    let mentor = state
        .repo
        .update_mentor(id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentor not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Mentor updated", mentor)))
}

/// delete_mentor
///
/// [Staff Route] Removes a mentor profile.
#[utoipa::path(
    delete,
    path = "/api/v1/mentors/{id}",
    params(("id" = Uuid, Path, description = "Mentor ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_mentor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if state.repo.delete_mentor(id).await? {
        Ok(Json(ApiResponse::message("Mentor deleted")))
    } else {
        Err(ApiError::NotFound("Mentor not found".to_string()))
    }
}
