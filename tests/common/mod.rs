#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use msc_admin_api::{
    AppConfig, AppState, MockStorageService,
    auth::{self, AuthUser},
    models::{
        Course, CreateCourseRequest, CreateMentorRequest, CreatePostRequest,
        CreateProjectRequest, DashboardStats, Mentor, Post, Program, Project, Role,
        UpdateUserRequest, User,
    },
    repository::{NewUser, Repository},
    storage::StorageState,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use uuid::Uuid;

// --- IN-MEMORY REPOSITORY ---

// Handlers depend on the Repository trait, so tests drive the full stack
// against this in-memory implementation instead of a live Postgres.
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    roles: Vec<Role>,
    user_roles: HashMap<Uuid, Vec<String>>,
    courses: Vec<Course>,
    posts: Vec<Post>,
    mentors: Vec<Mentor>,
    programs: Vec<Program>,
    projects: Vec<Project>,
}

#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an account with a real bcrypt digest and the given roles,
    /// bypassing the register endpoint.
    pub fn seed_user(&self, full_name: &str, email: &str, password: &str, roles: &[&str]) -> User {
        let user = User {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_lowercase(),
            password_hash: auth::hash_password(password).unwrap(),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables
            .user_roles
            .insert(user.id, roles.iter().map(|r| r.to_string()).collect());
        tables.users.push(user.clone());
        user
    }

    pub fn seed_course(&self, slug: &str, title: &str, status: &str) -> Course {
        let course = Course {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Course::default()
        };
        self.tables.lock().unwrap().courses.push(course.clone());
        course
    }

    pub fn seed_post(&self, slug: &str, title: &str, status: &str) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Post::default()
        };
        self.tables.lock().unwrap().posts.push(post.clone());
        post
    }

    pub fn seed_project(&self, slug: &str, title: &str, status: &str) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            mentors: serde_json::json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Project::default()
        };
        self.tables.lock().unwrap().projects.push(project.clone());
        project
    }

    pub fn course_by_id(&self, id: Uuid) -> Option<Course> {
        self.tables
            .lock()
            .unwrap()
            .courses
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn user_by_id(&self, id: Uuid) -> Option<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn role_names(&self) -> Vec<String> {
        self.tables
            .lock()
            .unwrap()
            .roles
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

fn page_slice<T: Clone>(rows: &[T], page: i64, limit: i64) -> Vec<T> {
    rows.iter()
        .rev() // newest first, mirroring created_at DESC ordering
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        Ok(self.user_by_id(id))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, sqlx::Error> {
        let record = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(record.clone());
        Ok(record)
    }

    async fn list_users(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<User>, i64), sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let filtered: Vec<User> = tables
            .users
            .iter()
            .filter(|u| match &search {
                Some(s) => {
                    let s = s.to_lowercase();
                    u.full_name.to_lowercase().contains(&s) || u.email.contains(&s)
                }
                None => true,
            })
            .cloned()
            .collect();
        let total = filtered.len() as i64;
        Ok((page_slice(&filtered, page, limit), total))
    }

    async fn update_user(
        &self,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|u| {
            if let Some(name) = req.full_name {
                u.full_name = name;
            }
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() < before)
    }

    async fn list_roles_by_user(&self, user_id: Uuid) -> Result<Vec<Role>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .user_roles
            .get(&user_id)
            .map(|names| {
                names
                    .iter()
                    .map(|name| Role {
                        id: Uuid::new_v4(),
                        name: name.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn seed_roles(&self, names: &[&str]) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        for name in names {
            if !tables.roles.iter().any(|r| r.name == *name) {
                tables.roles.push(Role {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    async fn list_courses(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Course>, i64), sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let filtered: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| match &search {
                Some(s) => {
                    let s = s.to_lowercase();
                    c.title.to_lowercase().contains(&s) || c.slug.contains(&s)
                }
                None => true,
            })
            .cloned()
            .collect();
        let total = filtered.len() as i64;
        Ok((page_slice(&filtered, page, limit), total))
    }

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
        Ok(self.course_by_id(id))
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course, sqlx::Error> {
        let course = Course {
            id: Uuid::new_v4(),
            slug: req.slug,
            title: req.title,
            description: req.description,
            image: req.image,
            category: req.category,
            status: req.status.unwrap_or_else(|| "pending".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables.lock().unwrap().courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        id: Uuid,
        req: CreateCourseRequest,
    ) -> Result<Option<Course>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.courses.iter_mut().find(|c| c.id == id).map(|c| {
            c.slug = req.slug;
            c.title = req.title;
            c.description = req.description;
            c.image = req.image;
            c.category = req.category;
            if let Some(status) = req.status {
                c.status = status;
            }
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        Ok(tables.courses.len() < before)
    }

    async fn set_course_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Course>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.courses.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status.to_string();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn list_posts(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Post>, i64), sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let filtered: Vec<Post> = tables
            .posts
            .iter()
            .filter(|p| match &search {
                Some(s) => {
                    let s = s.to_lowercase();
                    p.title.to_lowercase().contains(&s) || p.slug.contains(&s)
                }
                None => true,
            })
            .cloned()
            .collect();
        let total = filtered.len() as i64;
        Ok((page_slice(&filtered, page, limit), total))
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create_post(&self, req: CreatePostRequest) -> Result<Post, sqlx::Error> {
        let post = Post {
            id: Uuid::new_v4(),
            slug: req.slug,
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            image: req.image,
            category: req.category,
            status: req.status.unwrap_or_else(|| "pending".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables.lock().unwrap().posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: Uuid,
        req: CreatePostRequest,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.slug = req.slug;
            p.title = req.title;
            p.content = req.content;
            p.excerpt = req.excerpt;
            p.image = req.image;
            p.category = req.category;
            if let Some(status) = req.status {
                p.status = status;
            }
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        Ok(tables.posts.len() < before)
    }

    async fn set_post_status(&self, id: Uuid, status: &str) -> Result<Option<Post>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.status = status.to_string();
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn list_blog_posts(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Post>, i64), sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let approved: Vec<Post> = tables
            .posts
            .iter()
            .filter(|p| p.status == "approved")
            .cloned()
            .collect();
        let total = approved.len() as i64;
        Ok((page_slice(&approved, page, limit), total))
    }

    async fn get_blog_post(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == id && p.status == "approved")
            .cloned())
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.slug == slug && p.status == "approved")
            .cloned())
    }

    async fn list_mentors(
        &self,
        page: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<Mentor>, i64), sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let filtered: Vec<Mentor> = tables
            .mentors
            .iter()
            .filter(|m| match &search {
                Some(s) => m.name.to_lowercase().contains(&s.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        let total = filtered.len() as i64;
        Ok((page_slice(&filtered, page, limit), total))
    }

    async fn get_mentor(&self, id: Uuid) -> Result<Option<Mentor>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .mentors
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create_mentor(&self, req: CreateMentorRequest) -> Result<Mentor, sqlx::Error> {
        let mentor = Mentor {
            id: Uuid::new_v4(),
            slug: req.slug,
            name: req.name,
            title: req.title,
            bio: req.bio,
            avatar: req.avatar,
            expertise: req.expertise,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables.lock().unwrap().mentors.push(mentor.clone());
        Ok(mentor)
    }

    async fn update_mentor(
        &self,
        id: Uuid,
        req: CreateMentorRequest,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.mentors.iter_mut().find(|m| m.id == id).map(|m| {
            m.slug = req.slug;
            m.name = req.name;
            m.title = req.title;
            m.bio = req.bio;
            m.avatar = req.avatar;
            m.expertise = req.expertise;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete_mentor(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.mentors.len();
        tables.mentors.retain(|m| m.id != id);
        Ok(tables.mentors.len() < before)
    }

    async fn list_programs(&self, limit: i64, offset: i64) -> Result<Vec<Program>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .programs
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_program(&self, id: Uuid) -> Result<Option<Program>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .programs
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_projects(
        &self,
        limit: i64,
        offset: i64,
        category: Option<String>,
        status: Option<String>,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let filtered: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| {
                category
                    .as_deref()
                    .is_none_or(|c| p.category.as_deref() == Some(c))
            })
            .filter(|p| status.as_deref().is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        let total = filtered.len() as i64;
        Ok((
            filtered
                .iter()
                .rev()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
            total,
        ))
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project, sqlx::Error> {
        let project = Project {
            id: Uuid::new_v4(),
            slug: req.slug,
            title: req.title,
            description: req.description,
            image: req.image,
            category: req.category,
            status: req.status.unwrap_or_else(|| "active".to_string()),
            mentors: req.mentors,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables.lock().unwrap().projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: Uuid,
        req: CreateProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.projects.iter_mut().find(|p| p.id == id).map(|p| {
            p.slug = req.slug;
            p.title = req.title;
            p.description = req.description;
            p.image = req.image;
            p.category = req.category;
            if let Some(status) = req.status {
                p.status = status;
            }
            p.mentors = req.mentors;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        Ok(tables.projects.len() < before)
    }

    async fn get_stats(&self) -> Result<DashboardStats, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(DashboardStats {
            total_users: tables.users.len() as i64,
            total_courses: tables.courses.len() as i64,
            total_posts: tables.posts.len() as i64,
            total_mentors: tables.mentors.len() as i64,
            total_projects: tables.projects.len() as i64,
            pending_courses: tables.courses.iter().filter(|c| c.status == "pending").count()
                as i64,
            pending_posts: tables.posts.iter().filter(|p| p.status == "pending").count() as i64,
        })
    }
}

// --- TEST UTILITIES ---

/// Bundles the in-memory repository with mock storage and the default config.
pub fn test_state(repo: Arc<InMemoryRepository>) -> AppState {
    AppState {
        repo,
        storage: Arc::new(MockStorageService::new()) as StorageState,
        config: AppConfig::default(),
    }
}

/// Spawns the full router on an ephemeral port and returns its base address.
pub async fn spawn_app(state: AppState) -> String {
    let router = msc_admin_api::create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// Mints a real signed token for a user, the same way the login handler does.
pub fn token_for(config: &AppConfig, user: &User, roles: &[&str]) -> String {
    auth::issue_token(
        user.id,
        &user.email,
        roles.iter().map(|r| r.to_string()).collect(),
        &config.jwt_secret,
        3600,
    )
    .unwrap()
}

/// Identity value for tests that call handlers directly.
pub fn identity(user: &User, roles: &[&str]) -> AuthUser {
    AuthUser {
        id: user.id,
        email: user.email.clone(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}
