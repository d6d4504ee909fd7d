/// Email value object and HTML templates
///
/// Renders the fixed notification templates. An [`Email`] is transient: it
/// is built, handed to the dispatcher, and discarded.

use chrono::{DateTime, Utc};

use crate::models::task::{Task, TaskStatus};

/// Date format used inside email bodies (dd/M/yyyy, month without padding)
pub const MAIL_DATE_FORMAT: &str = "%d/%-m/%Y";

/// Subject line for task create/update notifications
pub const TASK_UPDATE_SUBJECT: &str = "Task update notification";

/// Subject line for password-reset emails
pub const PASSWORD_RESET_SUBJECT: &str = "Password reset request";

/// A rendered email, ready to hand to a mailer
#[derive(Debug, Clone)]
pub struct Email {
    /// Sender address
    pub from: String,

    /// Recipient address
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Rendered HTML body
    pub html_body: String,
}

/// Renders the task create/update notification for the task's assignee.
///
/// The body embeds the task name, a deep link (`{link_base}{task_id}`), the
/// start/end dates, the human status label, and `now` as the update
/// timestamp. Unknown status codes render as "Backlog".
pub fn task_update_email(
    from: &str,
    to: &str,
    task: &Task,
    link_base: &str,
    now: DateTime<Utc>,
) -> Email {
    let status = TaskStatus::from_code(task.status).label();
    let link = format!("{}{}", link_base, task.id);

    let html_body = format!(
        "<p>Task update notification from Workboard</p>\
         <p>Task details:</p>\
         <ul>\
             <li> Task: <b>{name}</b></li>\
             <li> Link: <b>{link}</b></li>\
             <li> Start date: <b>{start}</b></li>\
             <li> End date: <b>{end}</b></li>\
             <li> Status: <b>{status}</b></li>\
             <li> Updated: <b>{updated}</b></li>\
         </ul>\
         <p>We are sending this notification so you can confirm the details.</p>\
         <p>Thank you for using Workboard!</p>",
        name = task.name,
        link = link,
        start = task.start_date.format(MAIL_DATE_FORMAT),
        end = task.end_date.format(MAIL_DATE_FORMAT),
        status = status,
        updated = now.format(MAIL_DATE_FORMAT),
    );

    Email {
        from: from.to_string(),
        to: to.to_string(),
        subject: TASK_UPDATE_SUBJECT.to_string(),
        html_body,
    }
}

/// Renders the password-reset email carrying a one-time token.
pub fn password_reset_email(from: &str, to: &str, user_name: &str, token: &str) -> Email {
    let html_body = format!(
        "<p>A password reset was requested for your account:</p>\
         <ul>\
             <li> Account: <b>{user_name}</b></li>\
             <li> Reset token: <b>{token}</b></li>\
         </ul>\
         <p>The token is valid for one hour. If you did not request this, you can ignore this email.</p>\
         <p>Thank you for using Workboard!</p>",
    );

    Email {
        from: from.to_string(),
        to: to.to_string(),
        subject: PASSWORD_RESET_SUBJECT.to_string(),
        html_body,
    }
}
