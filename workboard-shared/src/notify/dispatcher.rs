/// Fire-and-forget email dispatch
///
/// Services never wait on email delivery. [`NotificationDispatcher::dispatch`]
/// pushes the rendered email onto an unbounded channel and returns
/// immediately; a background task drains the channel and hands each email to
/// the configured [`Mailer`]. A failed send is logged and dropped: no
/// retry, no acknowledgment, no effect on the enclosing operation. That
/// discard is the contract, not an accident.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use workboard_shared::notify::{Email, MockMailer, NotificationDispatcher};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mailer = MockMailer::new();
/// let dispatcher = NotificationDispatcher::spawn(Arc::new(mailer.clone()));
///
/// dispatcher.dispatch(Email {
///     from: "noreply@workboard.local".into(),
///     to: "user@example.com".into(),
///     subject: "Hello".into(),
///     html_body: "<p>Hi</p>".into(),
/// });
/// # }
/// ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::email::Email;

/// Error type for mail delivery failures
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.)
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Email build error: {0}")]
    Build(String),
}

/// A mail-sending collaborator
///
/// Implementations: [`SmtpMailer`](super::smtp::SmtpMailer) for real
/// delivery, [`LogMailer`] when SMTP is not configured, and
/// [`MockMailer`](super::mock::MockMailer) for tests.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers one email.
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Fallback mailer that logs instead of sending
///
/// Used when SMTP is not configured so the rest of the system behaves
/// identically in development.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "SMTP not configured, logging email instead of sending"
        );
        Ok(())
    }
}

/// Handle for dispatching emails without waiting on delivery
///
/// Cheap to clone; all clones feed the same background drain task.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::UnboundedSender<Email>,
}

impl NotificationDispatcher {
    /// Starts the background drain task and returns the dispatch handle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(mailer: Arc<dyn Mailer>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Email>();

        tokio::spawn(async move {
            while let Some(email) = rx.recv().await {
                let to = email.to.clone();
                if let Err(e) = mailer.send(email).await {
                    // Best-effort: failures are logged and dropped
                    tracing::warn!(to = %to, error = %e, "Email delivery failed");
                }
            }
        });

        NotificationDispatcher { tx }
    }

    /// Queues an email for delivery and returns immediately.
    ///
    /// The outcome is discarded; callers cannot observe whether the send
    /// later succeeds.
    pub fn dispatch(&self, email: Email) {
        if self.tx.send(email).is_err() {
            tracing::warn!("Notification channel closed, dropping email");
        }
    }
}
