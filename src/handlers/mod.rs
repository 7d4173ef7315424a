// Request handlers, grouped by resource. Every handler returns the uniform
// success envelope or an `ApiError` from the shared taxonomy.

pub mod auth;
pub mod blog;
pub mod courses;
pub mod dashboard;
pub mod mentors;
pub mod posts;
pub mod programs;
pub mod projects;
pub mod upload;
pub mod users;
