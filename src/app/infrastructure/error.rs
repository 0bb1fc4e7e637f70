use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Short message suitable for the status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Io(_) => "A file operation failed.",
            Self::Storage(_) => "Could not save the workspace.",
            Self::Json(_) => "Stored data could not be read.",
            Self::Settings(_) => "Settings could not be loaded.",
        }
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("read-only volume"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Settings("invalid timeout".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid timeout");

        let err = AppError::Storage("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");
    }

    #[test]
    fn test_user_message_is_short() {
        let err = AppError::Storage("x".to_string());
        assert_eq!(err.user_message(), "Could not save the workspace.");
    }
}
