use thiserror::Error;

use handee_shared::TransitionError;

/// Reasons a command is refused.  The message is what the user sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Please login to {0}")]
    NotAuthenticated(&'static str),

    #[error("You do not have access to this {0}")]
    AccessDenied(&'static str),

    #[error("You cannot make a deal on your own listing")]
    SelfDeal,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_naturally() {
        assert_eq!(
            AppError::MissingFields(vec!["title", "category"]).to_string(),
            "Please fill in all required fields: title, category"
        );
        assert_eq!(
            AppError::NotAuthenticated("propose a deal").to_string(),
            "Please login to propose a deal"
        );
        assert_eq!(
            AppError::AccessDenied("deal").to_string(),
            "You do not have access to this deal"
        );
    }
}
