/// Email notification support
///
/// - `email`: the transient [`Email`](email::Email) value and HTML rendering
/// - `dispatcher`: the [`Mailer`](dispatcher::Mailer) trait and the
///   fire-and-forget [`NotificationDispatcher`](dispatcher::NotificationDispatcher)
/// - `smtp`: lettre-backed SMTP mailer
/// - `mock`: capturing mailer for tests

pub mod dispatcher;
pub mod email;
pub mod mock;
pub mod smtp;

pub use dispatcher::{LogMailer, MailError, Mailer, NotificationDispatcher};
pub use email::{password_reset_email, task_update_email, Email, MAIL_DATE_FORMAT};
pub use mock::MockMailer;
pub use smtp::{SmtpConfig, SmtpMailer};
