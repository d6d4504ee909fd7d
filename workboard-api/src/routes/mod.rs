/// HTTP route handlers
///
/// Handlers are thin: build the service from state, await the envelope,
/// return it as JSON with a plain `200 OK` status line. The envelope's
/// `status_code` carries the application-level verdict; request bodies are
/// taken as `Option<Json<T>>` so a missing or malformed payload flows into
/// the service's rejection path instead of a framework error page.
///
/// - `health`: Health check endpoint
/// - `auth`: Login and forgot-password
/// - `users`: User CRUD, filter, per-user tasks
/// - `projects`: Project CRUD and per-project tasks
/// - `tasks`: Task CRUD, filters, due sweep

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
