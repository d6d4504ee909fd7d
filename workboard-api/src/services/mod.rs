/// Domain services
///
/// Each service exposes CRUD plus a handful of filter/view operations,
/// composing the models and (for tasks and users) the notification
/// dispatcher. Every public method returns
/// [`ResponseBase<T>`](workboard_shared::response::ResponseBase) and never
/// lets a failure escape to the HTTP layer: internals run on
/// `Result<T, ServiceError>` and a single conversion collapses the error
/// kinds into envelope codes.
///
/// Services hold cheap clone handles (pool, dispatcher) and no cross-request
/// state; one is built per request from `AppState`.

pub mod projects;
pub mod tasks;
pub mod users;

pub use projects::ProjectService;
pub use tasks::TaskService;
pub use users::UserService;

/// Flattens validator errors into one deterministic message string.
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
