use thiserror::Error;

/// User-facing notification shown whenever a submission does not succeed.
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "There was an error submitting the form. Please try again.";

/// Errors loading the form schema. Fatal: no form can be shown.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("schema source unreachable: {0}")]
    Unreachable(String),

    #[error("schema source returned status {status}")]
    Status { status: u16 },

    #[error("schema parse error: {0}")]
    Parse(String),

    #[error("inconsistent schema: {0}")]
    Inconsistent(String),
}

/// Per-field validation failure. The display string is the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Errors reported by a submission collaborator.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("endpoint rejected submission with status {status}")]
    Rejected { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("submission timed out")]
    Timeout,
}

impl SubmissionError {
    /// The message shown to the person filling in the form.
    pub fn user_message(&self) -> &'static str {
        SUBMISSION_FAILED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::Required.to_string(), "This field is required");
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_schema_load_error_display() {
        let err = SchemaLoadError::Status { status: 404 };
        assert_eq!(err.to_string(), "schema source returned status 404");
    }

    #[test]
    fn test_submission_error_user_message_is_generic() {
        let err = SubmissionError::Rejected { status: 500 };
        assert!(err.to_string().contains("500"));
        assert_eq!(err.user_message(), SUBMISSION_FAILED_MESSAGE);
        assert_eq!(SubmissionError::Timeout.user_message(), SUBMISSION_FAILED_MESSAGE);
    }
}
