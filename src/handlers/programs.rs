use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, Program, ProgramFilter},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// list_programs
///
/// [Public Route] Lists training programs for the public site, limit/offset
/// style, newest first.
#[utoipa::path(
    get,
    path = "/api/programs",
    params(ProgramFilter),
    responses((status = 200, description = "Programs", body = [Program]))
)]
pub async fn list_programs(
    State(state): State<AppState>,
    Query(filter): Query<ProgramFilter>,
) -> Result<Json<ApiResponse<Vec<Program>>>, ApiError> {
    let programs = state
        .repo
        .list_programs(filter.limit(), filter.offset())
        .await?;

    Ok(Json(ApiResponse::ok(programs)))
}

/// get_program
///
/// [Public Route] Fetches a single program by id.
#[utoipa::path(
    get,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program", body = Program),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    let program = state
        .repo
        .get_program(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Program not found".to_string()))?;

    Ok(Json(ApiResponse::ok(program)))
}
