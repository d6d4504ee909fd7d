/// Capturing mailer for tests
///
/// Records every send attempt so tests can assert on recipients and bodies;
/// can be built failing to exercise the dispatcher's discard path.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::dispatcher::{MailError, Mailer};
use super::email::Email;

/// Mailer that captures emails instead of sending them
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<Email>>>,
    fail: bool,
}

impl MockMailer {
    /// Creates a mailer that accepts every email.
    pub fn new() -> Self {
        MockMailer::default()
    }

    /// Creates a mailer that records every attempt but reports failure.
    pub fn failing() -> Self {
        MockMailer {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// All emails attempted so far, in dispatch order.
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);

        if self.fail {
            Err(MailError::Build("mock mailer set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}
