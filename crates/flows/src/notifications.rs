//! User-visible notifications emitted by the session.

use pipeline::ExecutionId;

/// Title of the error notification raised for any failed submission.
pub const ERROR_TITLE: &str = "Error";

/// Description of the error notification raised for any failed submission.
pub const ERROR_DESCRIPTION: &str = "An error occurred while processing your request.";

/// Conclusion text written onto a record whose execution failed.
pub const FAILED_CONCLUSION: &str = "The AI failed to complete the request.";

/// Something a front end may want to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A record was created and is now running.
    ExecutionStarted { id: ExecutionId },

    /// A record reached `completed`.
    ExecutionCompleted { id: ExecutionId },

    /// A record reached `failed`.
    ExecutionFailed { id: ExecutionId },

    /// A generic, destructive-style error message. One per failed submission,
    /// whatever the cause.
    Error { title: String, description: String },
}

impl Notification {
    pub(crate) fn submission_failed() -> Self {
        Self::Error {
            title: ERROR_TITLE.to_string(),
            description: ERROR_DESCRIPTION.to_string(),
        }
    }
}
