// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Coarse classification used by callers that translate errors into
/// responses (404 / 400 / 500 at an HTTP boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Internal,
}

impl AppError {
    pub fn film_not_found(id: u64) -> Self {
        AppError::NotFound(format!("film {}", id))
    }

    pub fn user_not_found(id: u64) -> Self {
        AppError::NotFound(format!("user {}", id))
    }

    /// Catalog lookups that fail inside the domain surface as NotFound
    pub fn from_domain(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(what) => AppError::NotFound(what),
            other => AppError::Domain(other),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Domain(DomainError::NotFound(_)) => ErrorKind::NotFound,
            AppError::Domain(_) | AppError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            _ => ErrorKind::Internal,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        assert_eq!(AppError::film_not_found(7).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::Domain(DomainError::NotFound("genre 9".to_string())).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_invalid_argument_kind() {
        let err = AppError::InvalidArgument("count must be >= 0".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = AppError::Domain(DomainError::InvariantViolation("bad".to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_from_domain_lifts_not_found() {
        let err = AppError::from_domain(DomainError::NotFound("rating 9".to_string()));
        assert!(matches!(err, AppError::NotFound(ref what) if what == "rating 9"));

        let err = AppError::from_domain(DomainError::SelfFriendship(1));
        assert!(matches!(err, AppError::Domain(DomainError::SelfFriendship(1))));
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::Database(rusqlite::Error::InvalidQuery);
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::user_not_found(3)).unwrap();
        assert_eq!(json, "\"Not found: user 3\"");
    }
}
