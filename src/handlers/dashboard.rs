use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, DashboardStats},
};
use axum::{Json, extract::State};

/// get_stats
///
/// [Staff Route] Aggregated counters for the admin dashboard landing page.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses((status = 200, description = "Dashboard counters", body = DashboardStats))
)]
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.repo.get_stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}
