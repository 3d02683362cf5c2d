/// Database models for Taskboard
///
/// Each model owns the SQL for its table. Nothing is cached between requests;
/// the database is the only source of truth.
///
/// # Models
///
/// - `user`: Accounts keyed by email, with salt/hash credentials
/// - `task`: Task records with a free-text status
/// - `comment`: Comments attached to a task by id

pub mod comment;
pub mod task;
pub mod user;
