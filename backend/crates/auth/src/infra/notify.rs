//! Login Notification Queue
//!
//! Channel-backed implementation of the `LoginNotifier` port. Enqueueing
//! pushes onto an unbounded channel and returns immediately; a spawned
//! worker drains the channel and delivers through the platform mail
//! transport. Failures on either side are logged and swallowed - the
//! login that triggered the task has already been answered.

use platform::mailer::{Mail, MailTransport};
use tokio::sync::mpsc;

use crate::domain::notification::{LoginNotification, LoginNotifier};

const THANK_YOU_SUBJECT: &str = "Thank You for Logging In!";
const THANK_YOU_BODY: &str = "We appreciate your continued engagement with our platform!";

/// Fire-and-forget mail queue
#[derive(Clone)]
pub struct MailQueue {
    tx: mpsc::UnboundedSender<LoginNotification>,
}

impl MailQueue {
    /// Start the delivery worker and return the queue handle
    pub fn start(transport: MailTransport) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LoginNotification>();

        tokio::spawn(async move {
            while let Some(task) = rx.recv().await {
                tracing::info!(email = %task.email, "Started sending thank you email");

                let mail = Mail {
                    to: task.email.clone(),
                    subject: THANK_YOU_SUBJECT.to_string(),
                    body: THANK_YOU_BODY.to_string(),
                };

                match transport.send(&mail).await {
                    Ok(()) => {
                        tracing::info!(email = %task.email, "Successfully sent thank you email");
                    }
                    Err(e) => {
                        tracing::error!(
                            email = %task.email,
                            error = %e,
                            "Failed to send thank you email"
                        );
                    }
                }
            }
        });

        Self { tx }
    }
}

impl LoginNotifier for MailQueue {
    fn enqueue(&self, task: LoginNotification) {
        if let Err(e) = self.tx.send(task) {
            tracing::warn!(error = %e, "Login notification queue closed; dropping task");
        }
    }
}
