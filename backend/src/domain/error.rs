//! Error taxonomy shared by every domain service.
//!
//! Repositories report infrastructure failures as `anyhow::Error`; services
//! wrap those as [`DomainError::Storage`] and raise the other variants for
//! rule violations. The REST layer maps each variant to a status code.

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Malformed input such as an unparseable date or an empty name
    #[error("{0}")]
    Validation(String),
    /// The date is not eligible for attendance; blocks a whole batch
    #[error("{0}")]
    SchoolDay(String),
    /// A single bulk-write line named a student outside the class
    #[error("Student with id {0} not found in class.")]
    StudentNotInClass(i64),
    /// Missing resource, or one owned by another teacher
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid credentials.")]
    Authentication,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Storage(err.into())
    }
}
