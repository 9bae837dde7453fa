//! Repository error types
//!
//! Storage failures are classified here, once, so the service layer can map
//! them onto API errors without inspecting driver internals.
//!
//! # Example
//!
//! ```rust
//! use hub_admin::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("Role", 7);
//! assert_eq!(error.kind, RepositoryErrorKind::NotFound);
//! assert_eq!(error.to_string(), "Repository not_found error during find_by_id: Entity not found [Role: 7]");
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Finding a single entity by ID
    FindById,
    /// Finding multiple entities with filters
    FindAll,
    /// Counting entities matching filters
    Count,
    /// Creating a new entity
    Create,
    /// Updating an existing entity
    Update,
    /// Deleting an entity (hard delete)
    Delete,
    /// Soft deleting an entity
    SoftDelete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Count => write!(f, "count"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::SoftDelete => write!(f, "soft_delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Entity absent or soft-deleted
    NotFound,
    /// Unique constraint violated
    AlreadyExists,
    /// Foreign key constraint violated
    ForeignKeyViolation,
    /// Check constraint violated
    CheckViolation,
    /// Statement issued in an invalid transaction state
    InvalidTransaction,
    /// Request rejected before reaching the database
    ValidationFailed,
    /// Failed to connect to database
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Row could not be decoded into the entity
    SerializationError,
    /// Any other database error
    DatabaseError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ForeignKeyViolation => write!(f, "foreign_key_violation"),
            Self::CheckViolation => write!(f, "check_violation"),
            Self::InvalidTransaction => write!(f, "invalid_transaction"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "HubClient", "Role")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl fmt::Display) -> Self {
        Self::new(
            RepositoryOperation::FindById,
            RepositoryErrorKind::NotFound,
            "Entity not found",
        )
        .with_entity(entity_type, entity_id)
    }

    /// Create an "already exists" error with entity context
    pub fn already_exists(entity_type: impl Into<String>, identifier: impl fmt::Display) -> Self {
        Self::new(
            RepositoryOperation::Create,
            RepositoryErrorKind::AlreadyExists,
            "Entity already exists",
        )
        .with_entity(entity_type, identifier)
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::FindAll,
            RepositoryErrorKind::ValidationFailed,
            message,
        )
    }

    /// Classify a driver error raised during `operation`
    pub fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> Self {
        use sqlx::Error as E;

        let (kind, message) = match &err {
            E::RowNotFound => (RepositoryErrorKind::NotFound, "Entity not found".to_string()),
            E::Database(db) => {
                let kind = if db.is_unique_violation() {
                    RepositoryErrorKind::AlreadyExists
                } else if db.is_foreign_key_violation() {
                    RepositoryErrorKind::ForeignKeyViolation
                } else if db.is_check_violation() {
                    RepositoryErrorKind::CheckViolation
                } else if db.code().is_some_and(|code| is_invalid_transaction_state(&code)) {
                    RepositoryErrorKind::InvalidTransaction
                } else {
                    RepositoryErrorKind::DatabaseError
                };
                let message = match db.constraint() {
                    Some(constraint) => format!("{} (constraint: {})", db.message(), constraint),
                    None => db.message().to_string(),
                };
                (kind, message)
            }
            E::PoolTimedOut => (RepositoryErrorKind::Timeout, err.to_string()),
            E::PoolClosed | E::Io(_) | E::Tls(_) => {
                (RepositoryErrorKind::ConnectionFailed, err.to_string())
            }
            E::ColumnDecode { .. } | E::Decode(_) | E::ColumnNotFound(_) => {
                (RepositoryErrorKind::SerializationError, err.to_string())
            }
            _ => (RepositoryErrorKind::DatabaseError, err.to_string()),
        };

        Self::new(operation, kind, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl fmt::Display,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.to_string());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

/// SQLSTATE class 25: invalid transaction state
fn is_invalid_transaction_state(code: &str) -> bool {
    code.starts_with("25")
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}
