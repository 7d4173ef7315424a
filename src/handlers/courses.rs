use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, Course, CreateCourseRequest, ListParams, Paginated},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate(req: &CreateCourseRequest) -> Result<(), ApiError> {
    if req.slug.trim().is_empty() || req.title.trim().is_empty() {
        return Err(ApiError::Validation(
            "slug and title are required".to_string(),
        ));
    }
    Ok(())
}

/// list_courses
///
/// [Authenticated Route] Paginated course listing for the admin panel,
/// including pending and rejected entries.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(ListParams),
    responses((status = 200, description = "Courses page", body = [Course]))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Paginated<Course>>>, ApiError> {
    let page = params.page();
    let limit = params.limit_or(10);

    let (courses, total) = state.repo.list_courses(page, limit, params.search).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(
        courses, total, page, limit,
    ))))
}

/// get_course
///
/// [Authenticated Route] Fetches a single course by id.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let course = state
        .repo
        .get_course(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(ApiResponse::ok(course)))
}

/// create_course
///
/// [Contributor Route] Submits a new course. Unless a status is supplied it
/// starts as `pending` and waits for staff moderation.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Created", body = Course),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Duplicate slug")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), ApiError> {
    validate(&payload)?;
    let course = state.repo.create_course(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Course created", course)),
    ))
}

/// update_course
///
/// [Contributor Route] Replaces a course's content fields. Status is only
/// changed when explicitly supplied; moderation uses the dedicated endpoints.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Updated", body = Course),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    validate(&payload)?;
    let course = state
        .repo
        .update_course(id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Course updated", course)))
}

/// delete_course
///
/// [Staff Route] Removes a course permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if state.repo.delete_course(id).await? {
        Ok(Json(ApiResponse::message("Course deleted")))
    } else {
        Err(ApiError::NotFound("Course not found".to_string()))
    }
}

/// approve_course
///
/// [Staff Route] Moderation: marks a pending course as approved so the public
/// site picks it up.
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}/approve",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Approved", body = Course),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let course = state
        .repo
        .set_course_status(id, "approved")
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Course approved", course)))
}

/// reject_course
///
/// [Staff Route] Moderation: marks a course as rejected.
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}/reject",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Rejected", body = Course),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let course = state
        .repo
        .set_course_status(id, "rejected")
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Course rejected", course)))
}
