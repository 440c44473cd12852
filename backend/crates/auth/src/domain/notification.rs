//! Login Notification Port
//!
//! The login flow hands a task description to an asynchronous queue and
//! returns immediately. Enqueueing never blocks and never fails the
//! caller; a closed or unreachable queue is the implementation's problem
//! to log.

/// Task description for the login notification sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginNotification {
    /// Recipient address of the authenticated user
    pub email: String,
}

/// Port for the fire-and-forget notification queue
///
/// Implementations: the channel-backed mail queue in `infra::notify`
/// (production) and recording fakes (tests).
pub trait LoginNotifier: Send + Sync {
    /// Hand the task to the queue without blocking
    fn enqueue(&self, task: LoginNotification);
}
