use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, CreateProjectRequest, Paginated, Project, ProjectFilter},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate(req: &CreateProjectRequest) -> Result<(), ApiError> {
    if req.slug.trim().is_empty() || req.title.trim().is_empty() {
        return Err(ApiError::Validation(
            "slug and title are required".to_string(),
        ));
    }
    Ok(())
}

/// list_projects
///
/// [Public Route] Paginated project listing with optional category and status
/// filters. Served both to the public site and to the admin panel.
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectFilter),
    responses((status = 200, description = "Projects page", body = [Project]))
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<ApiResponse<Paginated<Project>>>, ApiError> {
    let page = filter.page();
    let limit = filter.limit();

    let (projects, total) = state
        .repo
        .list_projects(limit, filter.offset(), filter.category, filter.status)
        .await?;

    Ok(Json(ApiResponse::ok(Paginated::new(
        projects, total, page, limit,
    ))))
}

/// get_project
///
/// [Public Route] Fetches a single project by id.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .repo
        .get_project(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ApiResponse::ok(project)))
}

/// get_project_by_slug
///
/// [Public Route] Slug-based lookup used by the public site's pretty URLs.
#[utoipa::path(
    get,
    path = "/api/projects/slug/{slug}",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_project_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .repo
        .get_project_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ApiResponse::ok(project)))
}

/// create_project
///
/// [Staff Route] Adds a showcase project. New projects default to `active`
/// status when the payload omits one.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Created", body = Project),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Duplicate slug")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    validate(&payload)?;
    let project = state.repo.create_project(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Project created", project)),
    ))
}

/// update_project
///
/// [Staff Route] Replaces a project's fields, including its mentors document.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Updated", body = Project),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    validate(&payload)?;
    let project = state
        .repo
        .update_project(id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ApiResponse::with_message("Project updated", project)))
}

/// delete_project
///
/// [Staff Route] Removes a project permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if state.repo.delete_project(id).await? {
        Ok(Json(ApiResponse::message("Project deleted")))
    } else {
        Err(ApiError::NotFound("Project not found".to_string()))
    }
}
