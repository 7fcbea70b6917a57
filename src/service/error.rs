use reqwest::StatusCode;
use thiserror::Error;

/// Failures the backend wrapper can report. Transport and server failures are
/// not retried and are surfaced the same way to the user.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not logged in")]
    MissingToken,
    #[error("server returned {status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// The server-supplied message when the error body carried one, otherwise
    /// the given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Server {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn empty_server_message_falls_back() {
        let err = ApiError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::new(),
        };
        assert_eq!(err.user_message("Login failed"), "Login failed");
        assert_eq!(ApiError::MissingToken.user_message("Login failed"), "Login failed");
    }
}
