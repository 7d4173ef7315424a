use crate::models::{
    Course, CreateCourseRequest, CreateMentorRequest, CreatePostRequest, CreateProjectRequest,
    DashboardStats, Mentor, Post, Program, Project, Role, UpdateUserRequest, User,
};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// NewUser
///
/// Persistence input for user creation. Built by the register flow after
/// validation and password hashing; the email arrives already lowercased.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
}

/// Repository Trait
///
/// The abstract contract for all persistence operations. Handlers interact with
/// the data layer through this trait only, so tests can substitute an in-memory
/// implementation. Every method returns `Result` — storage is a possibly-failing
/// remote collaborator and errors are translated to the API taxonomy at the
/// handler boundary, never swallowed here.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users & Roles ---
    /// Lookup by email, case-insensitive.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
    async fn create_user(&self, user: NewUser) -> Result<User, sqlx::Error>;
    /// Paginated listing with optional name/email search.
    async fn list_users(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<User>, i64), sqlx::Error>;
    async fn update_user(
        &self,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<Option<User>, sqlx::Error>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    async fn list_roles_by_user(&self, user_id: Uuid) -> Result<Vec<Role>, sqlx::Error>;
    /// Idempotent upsert-by-name of the fixed role vocabulary. Run at startup.
    async fn seed_roles(&self, names: &[&str]) -> Result<(), sqlx::Error>;

    // --- Courses ---
    async fn list_courses(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Course>, i64), sqlx::Error>;
    async fn get_course(&self, id: Uuid) -> Result<Option<Course>, sqlx::Error>;
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course, sqlx::Error>;
    async fn update_course(
        &self,
        id: Uuid,
        req: CreateCourseRequest,
    ) -> Result<Option<Course>, sqlx::Error>;
    async fn delete_course(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    /// Moderation: flips the status field ("approved" / "rejected").
    async fn set_course_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Course>, sqlx::Error>;

    // --- Posts ---
    async fn list_posts(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Post>, i64), sqlx::Error>;
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error>;
    async fn create_post(&self, req: CreatePostRequest) -> Result<Post, sqlx::Error>;
    async fn update_post(
        &self,
        id: Uuid,
        req: CreatePostRequest,
    ) -> Result<Option<Post>, sqlx::Error>;
    async fn delete_post(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    async fn set_post_status(&self, id: Uuid, status: &str) -> Result<Option<Post>, sqlx::Error>;

    // --- Blog feed (public, approved posts only) ---
    async fn list_blog_posts(&self, page: i64, limit: i64)
    -> Result<(Vec<Post>, i64), sqlx::Error>;
    async fn get_blog_post(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<Post>, sqlx::Error>;

    // --- Mentors ---
    async fn list_mentors(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Mentor>, i64), sqlx::Error>;
    async fn get_mentor(&self, id: Uuid) -> Result<Option<Mentor>, sqlx::Error>;
    async fn create_mentor(&self, req: CreateMentorRequest) -> Result<Mentor, sqlx::Error>;
    async fn update_mentor(
        &self,
        id: Uuid,
        req: CreateMentorRequest,
    ) -> Result<Option<Mentor>, sqlx::Error>;
    async fn delete_mentor(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Programs (read-only) ---
    async fn list_programs(&self, limit: i64, offset: i64) -> Result<Vec<Program>, sqlx::Error>;
    async fn get_program(&self, id: Uuid) -> Result<Option<Program>, sqlx::Error>;

    // --- Projects ---
    async fn list_projects(
        &self,
        limit: i64,
        offset: i64,
        category: Option<String>,
        status: Option<String>,
    ) -> Result<(Vec<Project>, i64), sqlx::Error>;
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, sqlx::Error>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, sqlx::Error>;
    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project, sqlx::Error>;
    async fn update_project(
        &self,
        id: Uuid,
        req: CreateProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error>;
    async fn delete_project(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Dashboard ---
    async fn get_stats(&self) -> Result<DashboardStats, sqlx::Error>;
}

/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

const USER_COLS: &str = "id, full_name, email, password_hash, phone, created_at, updated_at";
const COURSE_COLS: &str = "id, slug, title, description, image, category, status, created_at, updated_at";
const POST_COLS: &str =
    "id, slug, title, content, excerpt, image, category, status, created_at, updated_at";
const MENTOR_COLS: &str = "id, slug, name, title, bio, avatar, expertise, created_at, updated_at";
const PROGRAM_COLS: &str = "id, slug, title, description, detailed_content, duration, students, level, price, image, highlights, category, created_at, updated_at";
const PROJECT_COLS: &str =
    "id, slug, title, description, image, category, status, mentors, created_at, updated_at";

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shared listing helper: counts and fetches one page of rows, applying an
    /// optional ILIKE search over the given columns. All user input goes through
    /// bind parameters.
    async fn paged_search<T>(
        &self,
        table: &str,
        cols: &str,
        search_cols: &[&str],
        search: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<T>, i64), sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let pattern = search.map(|s| format!("%{}%", s));

        let mut count_builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table));
        if let Some(p) = &pattern {
            count_builder.push(" WHERE (");
            for (i, col) in search_cols.iter().enumerate() {
                if i > 0 {
                    count_builder.push(" OR ");
                }
                count_builder.push(format!("{} ILIKE ", col));
                count_builder.push_bind(p.clone());
            }
            count_builder.push(")");
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM {}", cols, table));
        if let Some(p) = &pattern {
            builder.push(" WHERE (");
            for (i, col) in search_cols.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push(format!("{} ILIKE ", col));
                builder.push_bind(p.clone());
            }
            builder.push(")");
        }
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok((rows, total))
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- Users & Roles ---

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, full_name, email, password_hash, phone, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) RETURNING {}",
            USER_COLS
        ))
        .bind(Uuid::new_v4())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_users(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<User>, i64), sqlx::Error> {
        self.paged_search(
            "users",
            USER_COLS,
            &["full_name", "email"],
            search,
            limit,
            (page - 1) * limit,
        )
        .await
    }

    async fn update_user(
        &self,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET full_name = COALESCE($2, full_name), updated_at = NOW()
             WHERE id = $1 RETURNING {}",
            USER_COLS
        ))
        .bind(id)
        .bind(req.full_name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_roles_by_user(&self, user_id: Uuid) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT r.id, r.name FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1 ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn seed_roles(&self, names: &[&str]) -> Result<(), sqlx::Error> {
        for name in names {
            sqlx::query(
                "INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    // --- Courses ---

    async fn list_courses(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Course>, i64), sqlx::Error> {
        self.paged_search(
            "courses",
            COURSE_COLS,
            &["title", "slug", "category"],
            search,
            limit,
            (page - 1) * limit,
        )
        .await
    }

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (id, slug, title, description, image, category, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW()) RETURNING {}",
            COURSE_COLS
        ))
        .bind(Uuid::new_v4())
        .bind(&req.slug)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.status.as_deref().unwrap_or("pending"))
        .fetch_one(&self.pool)
        .await
    }

    async fn update_course(
        &self,
        id: Uuid,
        req: CreateCourseRequest,
    ) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET slug = $2, title = $3, description = $4, image = $5,
             category = $6, status = COALESCE($7, status), updated_at = NOW()
             WHERE id = $1 RETURNING {}",
            COURSE_COLS
        ))
        .bind(id)
        .bind(&req.slug)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_course_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            COURSE_COLS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    // --- Posts ---

    async fn list_posts(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Post>, i64), sqlx::Error> {
        self.paged_search(
            "posts",
            POST_COLS,
            &["title", "slug", "category"],
            search,
            limit,
            (page - 1) * limit,
        )
        .await
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!("SELECT {} FROM posts WHERE id = $1", POST_COLS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_post(&self, req: CreatePostRequest) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (id, slug, title, content, excerpt, image, category, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW()) RETURNING {}",
            POST_COLS
        ))
        .bind(Uuid::new_v4())
        .bind(&req.slug)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.excerpt)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.status.as_deref().unwrap_or("pending"))
        .fetch_one(&self.pool)
        .await
    }

    async fn update_post(
        &self,
        id: Uuid,
        req: CreatePostRequest,
    ) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET slug = $2, title = $3, content = $4, excerpt = $5, image = $6,
             category = $7, status = COALESCE($8, status), updated_at = NOW()
             WHERE id = $1 RETURNING {}",
            POST_COLS
        ))
        .bind(id)
        .bind(&req.slug)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.excerpt)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_post_status(&self, id: Uuid, status: &str) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            POST_COLS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    // --- Blog feed ---

    async fn list_blog_posts(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Post>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE status = 'approved'")
            .fetch_one(&self.pool)
            .await?;

        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE status = 'approved'
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            POST_COLS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await?;

        Ok((posts, total))
    }

    async fn get_blog_post(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE id = $1 AND status = 'approved'",
            POST_COLS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE slug = $1 AND status = 'approved'",
            POST_COLS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    // --- Mentors ---

    async fn list_mentors(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Mentor>, i64), sqlx::Error> {
        self.paged_search(
            "mentors",
            MENTOR_COLS,
            &["name", "slug", "title"],
            search,
            limit,
            (page - 1) * limit,
        )
        .await
    }

    async fn get_mentor(&self, id: Uuid) -> Result<Option<Mentor>, sqlx::Error> {
        sqlx::query_as::<_, Mentor>(&format!(
            "SELECT {} FROM mentors WHERE id = $1",
            MENTOR_COLS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_mentor(&self, req: CreateMentorRequest) -> Result<Mentor, sqlx::Error> {
        sqlx::query_as::<_, Mentor>(&format!(
            "INSERT INTO mentors (id, slug, name, title, bio, avatar, expertise, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW()) RETURNING {}",
            MENTOR_COLS
        ))
        .bind(Uuid::new_v4())
        .bind(&req.slug)
        .bind(&req.name)
        .bind(&req.title)
        .bind(&req.bio)
        .bind(&req.avatar)
        .bind(&req.expertise)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_mentor(
        &self,
        id: Uuid,
        req: CreateMentorRequest,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        sqlx::query_as::<_, Mentor>(&format!(
            "UPDATE mentors SET slug = $2, name = $3, title = $4, bio = $5, avatar = $6,
             expertise = $7, updated_at = NOW() WHERE id = $1 RETURNING {}",
            MENTOR_COLS
        ))
        .bind(id)
        .bind(&req.slug)
        .bind(&req.name)
        .bind(&req.title)
        .bind(&req.bio)
        .bind(&req.avatar)
        .bind(&req.expertise)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_mentor(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mentors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Programs ---

    async fn list_programs(&self, limit: i64, offset: i64) -> Result<Vec<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>(&format!(
            "SELECT {} FROM programs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            PROGRAM_COLS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_program(&self, id: Uuid) -> Result<Option<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>(&format!(
            "SELECT {} FROM programs WHERE id = $1",
            PROGRAM_COLS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    // --- Projects ---

    async fn list_projects(
        &self,
        limit: i64,
        offset: i64,
        category: Option<String>,
        status: Option<String>,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let mut count_builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM projects WHERE 1 = 1");
        if let Some(c) = &category {
            count_builder.push(" AND category = ");
            count_builder.push_bind(c.clone());
        }
        if let Some(s) = &status {
            count_builder.push(" AND status = ");
            count_builder.push_bind(s.clone());
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM projects WHERE 1 = 1", PROJECT_COLS));
        if let Some(c) = &category {
            builder.push(" AND category = ");
            builder.push_bind(c.clone());
        }
        if let Some(s) = &status {
            builder.push(" AND status = ");
            builder.push_bind(s.clone());
        }
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;
        Ok((projects, total))
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE slug = $1",
            PROJECT_COLS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (id, slug, title, description, image, category, status, mentors, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW()) RETURNING {}",
            PROJECT_COLS
        ))
        .bind(Uuid::new_v4())
        .bind(&req.slug)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.status.as_deref().unwrap_or("active"))
        .bind(&req.mentors)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_project(
        &self,
        id: Uuid,
        req: CreateProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET slug = $2, title = $3, description = $4, image = $5,
             category = $6, status = COALESCE($7, status), mentors = $8, updated_at = NOW()
             WHERE id = $1 RETURNING {}",
            PROJECT_COLS
        ))
        .bind(id)
        .bind(&req.slug)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.category)
        .bind(req.status)
        .bind(&req.mentors)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Dashboard ---

    /// Compiles all counters for the administrative dashboard in one call.
    async fn get_stats(&self) -> Result<DashboardStats, sqlx::Error> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let total_courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;
        let total_posts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        let total_mentors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mentors")
            .fetch_one(&self.pool)
            .await?;
        let total_projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        let pending_courses: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;
        let pending_posts: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        Ok(DashboardStats {
            total_users,
            total_courses,
            total_posts,
            total_mentors,
            total_projects,
            pending_courses,
            pending_posts,
        })
    }
}
