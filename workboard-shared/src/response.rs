/// Uniform response envelope
///
/// Every public service operation returns a [`ResponseBase<T>`] and never
/// lets an error escape to its caller. The envelope carries an
/// application-level status code, the payload (or `null` on failure), and a
/// human-readable message.
///
/// Internally operations return `Result<T, ServiceError>`; the kinds are
/// collapsed into envelope codes at a single conversion point
/// (`From<ServiceError>`). The HTTP layer returns the envelope with a plain
/// `200 OK` status line; the envelope's `status_code` is the verdict.
///
/// # Example
///
/// ```
/// use workboard_shared::response::{ResponseBase, ServiceError};
///
/// let ok: ResponseBase<i32> = ResponseBase::ok(1, "Success");
/// assert_eq!(ok.status_code, 200);
///
/// let err: ResponseBase<i32> = ServiceError::Validation("invalid payload".into()).into();
/// assert_eq!(err.status_code, 400);
/// assert!(err.data.is_none());
/// ```

use serde::{Deserialize, Serialize};

use crate::auth::password::PasswordError;

/// Envelope code for a successful operation.
pub const STATUS_OK: i32 = 200;

/// Envelope code for validation, not-found, and infrastructure failures.
pub const STATUS_BAD_REQUEST: i32 = 400;

/// Envelope code for a failed login.
///
/// A server-error code for a client condition is a wire-compatibility quirk
/// carried over deliberately; see DESIGN.md.
pub const STATUS_BAD_CREDENTIALS: i32 = 500;

/// The envelope returned by every service operation.
///
/// `status_code == 200` iff the operation succeeded and `data` holds the
/// operation's payload. Any other code signals failure, `data` is `null`,
/// and `message` explains what went wrong. Built fresh per call and never
/// mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBase<T> {
    /// Application-level status code (200, 400, or 500)
    pub status_code: i32,

    /// Payload on success, `null` on failure
    pub data: Option<T>,

    /// Human-readable outcome description
    pub message: String,
}

impl<T> ResponseBase<T> {
    /// Wraps a successful result.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ResponseBase {
            status_code: STATUS_OK,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Wraps a success whose payload may legitimately be absent.
    ///
    /// Id lookups report a missing row as a success with `null` data, not as
    /// a failure; callers distinguish the cases by inspecting `data`.
    pub fn ok_opt(data: Option<T>, message: impl Into<String>) -> Self {
        ResponseBase {
            status_code: STATUS_OK,
            data,
            message: message.into(),
        }
    }

    /// Wraps a failure with the given envelope code and no payload.
    pub fn failure(status_code: i32, message: impl Into<String>) -> Self {
        ResponseBase {
            status_code,
            data: None,
            message: message.into(),
        }
    }

    /// True when the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Failure taxonomy for service operations.
///
/// Kinds stay distinguishable internally (and in logs) even though most of
/// them share an envelope code on the wire.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// An id lookup came back empty where existence is required
    #[error("{0}")]
    NotFound(String),

    /// Login mismatch; one fixed message, never revealing which field was wrong
    #[error("Incorrect username or password")]
    BadCredentials,

    /// The store or another collaborator failed
    #[error("{0}")]
    Infrastructure(String),
}

impl ServiceError {
    /// Envelope code for this failure kind.
    pub fn status_code(&self) -> i32 {
        match self {
            ServiceError::BadCredentials => STATUS_BAD_CREDENTIALS,
            _ => STATUS_BAD_REQUEST,
        }
    }

    /// Shorthand for a missing/invalid payload.
    pub fn invalid_payload() -> Self {
        ServiceError::Validation("Invalid payload".to_string())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Infrastructure(err.to_string())
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Infrastructure(err.to_string())
    }
}

impl<T> From<ServiceError> for ResponseBase<T> {
    fn from(err: ServiceError) -> Self {
        ResponseBase::failure(err.status_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let res = ResponseBase::ok(1, "Success");
        assert_eq!(res.status_code, STATUS_OK);
        assert_eq!(res.data, Some(1));
        assert_eq!(res.message, "Success");
        assert!(res.is_success());
    }

    #[test]
    fn test_failure_envelope_has_no_data() {
        let res: ResponseBase<i32> = ResponseBase::failure(STATUS_BAD_REQUEST, "Invalid payload");
        assert_eq!(res.status_code, 400);
        assert!(res.data.is_none());
        assert!(!res.is_success());
    }

    #[test]
    fn test_absent_lookup_is_still_success() {
        let res: ResponseBase<i32> = ResponseBase::ok_opt(None, "Success");
        assert_eq!(res.status_code, STATUS_OK);
        assert!(res.data.is_none());
        assert!(res.is_success());
    }

    #[test]
    fn test_service_error_codes() {
        assert_eq!(ServiceError::Validation("x".into()).status_code(), 400);
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), 400);
        assert_eq!(ServiceError::Infrastructure("x".into()).status_code(), 400);
        assert_eq!(ServiceError::BadCredentials.status_code(), 500);
    }

    #[test]
    fn test_bad_credentials_message_is_generic() {
        let res: ResponseBase<i32> = ServiceError::BadCredentials.into();
        assert_eq!(res.status_code, 500);
        assert_eq!(res.message, "Incorrect username or password");
    }

    #[test]
    fn test_failure_serializes_data_as_null() {
        let res: ResponseBase<i32> = ResponseBase::failure(400, "Invalid payload");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status_code"], 400);
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_ok_serializes_payload() {
        let res = ResponseBase::ok(1, "Success");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["data"], 1);
        assert_eq!(json["message"], "Success");
    }
}
