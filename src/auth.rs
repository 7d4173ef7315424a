use axum::{
    extract::{FromRef, FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{config::AppConfig, error::ApiError};

/// The fixed role vocabulary. Seeded idempotently at process start; matching is
/// exact and case-sensitive, with no hierarchy between roles.
pub const ROLE_NAMES: &[&str] = &["admin", "editor", "partner", "user"];

/// Claims
///
/// The payload structure carried inside a session token. Signed with the server's
/// secret and validated on every authenticated request. A token is a stateless,
/// self-contained snapshot: the embedded roles reflect the principal's roles at
/// issuance time and are never re-checked against storage by the gates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the UUID of the user.
    pub sub: Uuid,
    /// Email at issuance time. Informational; the profile handler re-fetches by id.
    pub email: String,
    /// Role names granted to the user at issuance time.
    pub roles: Vec<String>,
    /// Expiration timestamp (seconds since epoch). Tokens past this are rejected.
    pub exp: usize,
    /// Issued-at timestamp.
    pub iat: usize,
}

/// TokenError
///
/// Failure surface of the token service. Expired and invalid are discriminated
/// internally (for tests and logging) but both collapse to a generic 401 on the wire.
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
    #[error("signing failed")]
    Signing,
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => ApiError::Unauthenticated,
            TokenError::Signing => {
                tracing::error!("token signing failure");
                ApiError::Internal
            }
        }
    }
}

/// Issues a signed session token for the given principal.
///
/// The claims bundle {id, email, roles} plus expiry is encoded with the process-wide
/// symmetric secret. Fails only if the secret is unusable.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    roles: Vec<String>,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Signing);
    }

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        roles,
        iat: now,
        exp: now + ttl_secs as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Signing)
}

/// Verifies a session token and returns its decoded claims.
///
/// Must be called with the same secret that issued the token; rotating the secret
/// invalidates all outstanding tokens.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            // Bad signature, malformed structure, wrong algorithm, etc.
            _ => Err(TokenError::Invalid),
        },
    }
}

/// One-way password hash with a randomized salt. Two calls on the same plaintext
/// produce different digests.
pub fn hash_password(plaintext: &str) -> Result<String, ApiError> {
    Ok(bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)?)
}

/// Checks a plaintext against a stored digest. Never fails: a malformed digest and
/// a mismatch both yield `false`.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

/// AuthUser
///
/// The resolved identity of an authenticated request, decoded entirely from the
/// bearer token. Created by the authentication gate and threaded explicitly into
/// the role gate and handlers as a typed value; discarded when the request completes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a function
/// argument in any authenticated handler. Extraction reads the `Authorization:
/// Bearer <token>` header and verifies it against the injected signing secret; no
/// storage round-trip occurs here.
///
/// Rejection: 401 with a generic message on any failure — missing header, malformed
/// scheme, bad signature, or expiry. Internal error detail is never echoed.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // The authentication middleware stores the decoded identity as a typed
        // extension; reuse it instead of verifying the token twice per request.
        if let Some(identity) = parts.extensions.get::<AuthUser>() {
            return Ok(identity.clone());
        }

        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        let claims = verify_token(token, &config.jwt_secret)?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            roles: claims.roles,
        })
    }
}

/// Authentication gate applied to every protected route group.
///
/// Runs the AuthUser extractor (halting with 401 before any handler executes when
/// it fails) and attaches the identity to the request as a typed extension so the
/// role gate and handlers downstream can consume it without re-verification.
pub async fn auth_middleware(auth_user: AuthUser, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(auth_user);
    next.run(request).await
}

/// Authorization gate, composed after [`auth_middleware`].
///
/// Allows the chain to continue iff the authenticated identity holds at least one
/// of the `allowed` role names. Fails closed with 401 if no identity was populated
/// (i.e. the authentication gate did not run), and 403 when the intersection with
/// the allow-list is empty.
pub async fn authorize(
    allowed: &'static [&'static str],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::Unauthenticated)?;

    if identity
        .roles
        .iter()
        .any(|role| allowed.contains(&role.as_str()))
    {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::Forbidden)
    }
}
