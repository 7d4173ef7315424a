use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    models::{ApiResponse, LoginData, LoginRequest, RegisterRequest, UserData},
    repository::NewUser,
};
use axum::{Json, extract::State, http::StatusCode};

/// register
///
/// [Public Route] Creates a new account. The email is lowercased before any
/// lookup or persistence so uniqueness is case-insensitive end to end; the
/// password is hashed and the plaintext is dropped immediately.
///
/// Registration grants no roles. Role assignment is an out-of-band
/// administrative action, so a fresh account can log in but holds no
/// role-gated access.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserData),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserData>>), ApiError> {
    let full_name = payload.full_name.trim();
    if full_name.is_empty() {
        return Err(ApiError::Validation("full_name is required".to_string()));
    }
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("a valid email is required".to_string()));
    }
    if payload.password.len() < 6 {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }

    if state.repo.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let user = state
        .repo
        .create_user(NewUser {
            full_name: full_name.to_string(),
            email,
            phone: payload.phone,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Account created",
            UserData::from(&user),
        )),
    ))
}

/// login
///
/// [Public Route] Verifies credentials and issues a signed session token
/// embedding the account's current roles.
///
/// An unknown email and a wrong password produce the identical 401 response;
/// the two cases are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginData),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::Unauthenticated);
    }

    let roles = state
        .repo
        .list_roles_by_user(user.id)
        .await?
        .into_iter()
        .map(|role| role.name)
        .collect();

    let token = auth::issue_token(
        user.id,
        &user.email,
        roles,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;

    tracing::info!(user_id = %user.id, "login succeeded");

    Ok(Json(ApiResponse::ok(LoginData {
        token,
        user: UserData::from(&user),
    })))
}

/// profile
///
/// [Authenticated Route] Returns the requesting account's own record. The id
/// comes from the verified token; the record is re-fetched so a deleted
/// account with a still-valid token gets a 404, not stale claim data.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Profile", body = UserData),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserData>>, ApiError> {
    let user = state
        .repo
        .find_user_by_id(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(UserData::from(&user))))
}

/// logout
///
/// [Authenticated Route] Acknowledges sign-out. Tokens are stateless and there
/// is no server-side revocation list; the client discards its copy and the
/// token simply ages out at its expiry.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(_auth_user: AuthUser) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logged out successfully"))
}
