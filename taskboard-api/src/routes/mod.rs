/// API route handlers
///
/// Each handler maps one request to one storage call and translates the
/// outcome to a status code:
///
/// - `health`: Health check endpoint
/// - `users`: Registration, login/logout and profile endpoints
/// - `tasks`: Task CRUD and status updates
/// - `comments`: Comments attached to tasks

pub mod comments;
pub mod health;
pub mod tasks;
pub mod users;
