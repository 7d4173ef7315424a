use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The canonical identity record stored in the `users` table. Internal only: this
/// struct carries the password digest and is never serialized outward — responses
/// go through [`UserData`] / [`UserSummary`].
#[derive(Debug, Clone, FromRow, Default)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    // Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role
///
/// A named capability tag from the fixed vocabulary {admin, editor, partner, user}.
/// Seeded at process start; immutable once created. Linked to users through the
/// `user_roles` join table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}

/// Course
///
/// A training course record. New courses start in `pending` status and require
/// staff approval before the public site picks them up.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Course {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    // "pending" | "approved" | "rejected"
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Post
///
/// A blog/news post. Shares the moderation lifecycle with courses; only approved
/// posts appear in the public blog feed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Mentor
///
/// A mentor profile shown on the public site and managed by staff.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Mentor {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    // Maps to a Postgres text[] column.
    pub expertise: Vec<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Program
///
/// A training program listing. Read-only through this API.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Program {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub detailed_content: Option<String>,
    pub duration: Option<String>,
    pub students: Option<String>,
    pub level: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub highlights: Vec<String>,
    pub category: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Project
///
/// A showcase project. `mentors` is a free-form JSON document (list of mentor
/// references) kept as the frontend supplies it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    // Defaults to "active" on creation when the client omits it.
    pub status: String,
    #[ts(type = "unknown")]
    #[schema(value_type = Object)]
    pub mentors: serde_json::Value,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// Input payload for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Input payload for POST /api/auth/register. The password is hashed before
/// persistence and never stored or logged in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Explicit optional-field update payload for PUT /api/v1/users/{id}.
/// Only provided fields are touched; an empty payload is a validation error.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Input payload for creating (and fully replacing, on PUT) a course.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateCourseRequest {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Input payload for creating (and fully replacing, on PUT) a post.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreatePostRequest {
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Input payload for creating (and fully replacing, on PUT) a mentor.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateMentorRequest {
    pub slug: String,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
}

/// Input payload for creating (and fully replacing, on PUT) a project.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateProjectRequest {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[ts(type = "unknown")]
    #[schema(value_type = Object)]
    #[serde(default)]
    pub mentors: serde_json::Value,
}

/// Input payload for requesting a short-lived upload URL (POST /api/v1/upload).
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlRequest {
    /// The original filename, used to derive the file extension.
    #[schema(example = "mentor_avatar.png")]
    pub filename: String,
    /// The MIME type, used to constrain the upload to the allowed type.
    #[schema(example = "image/png")]
    pub file_type: String,
}

/// Output schema containing the temporary URL for client-to-cloud file transfer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlResponse {
    pub upload_url: String,
    /// The object key where the file will land (referenced later by entity records).
    pub resource_key: String,
}

// --- Output Schemas ---

/// Minimal public user fields carried in auth responses.
/// `full_name` is exposed as `fullName` for the admin frontend.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserData {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// Public user listing entry (no credential material).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Success payload for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginData {
    pub token: String,
    pub user: UserData,
}

/// Output schema for the administrative statistics dashboard (GET /api/v1/dashboard/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_courses: i64,
    pub total_posts: i64,
    pub total_mentors: i64,
    pub total_projects: i64,
    pub pending_courses: i64,
    pub pending_posts: i64,
}

// --- Envelopes ---

/// Uniform success envelope. Failures use the error envelope in `error.rs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Standard paginated listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

// --- Query Parameters ---

/// Accepted query parameters for paginated list endpoints.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams, Default)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Clamps the requested page size into 1..=100.
    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, 100)
    }

    pub fn offset(&self, limit: i64) -> i64 {
        (self.page() - 1) * limit
    }
}

/// Accepted query parameters for the project listings (both public and v1).
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams, Default)]
pub struct ProjectFilter {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ProjectFilter {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Accepted query parameters for the public program listing (limit/offset style).
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams, Default)]
pub struct ProgramFilter {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProgramFilter {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).clamp(0, 1_000_000)
    }
}
