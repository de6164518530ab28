//! Employee service error taxonomy

use super::paginator::OutOfRangePage;
use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};
use thiserror::Error;

/// Failure of an employee lifecycle operation
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("{0}")]
    ValidationFailed(String),

    /// Names the missing entity, e.g. `"Employee"`
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Carries the conflicting field name
    #[error("{0} already exists")]
    UniquenessConflict(String),

    #[error("Reached the end of the employees data")]
    OutOfRangePage(OutOfRangePage),

    #[error("Failed to reassign membership {item_id}: {reason}")]
    PartialReassignmentFailure { item_id: i64, reason: String },

    #[error("No approver available")]
    NoApproverAvailable,

    /// Store failure; the cause is kept for logging only
    #[error("Internal failure: {0}")]
    Internal(String),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(field) if field == "id" => {
                ServiceError::Internal("generated id collided".into())
            }
            RepoError::Duplicate(field) => ServiceError::UniquenessConflict(field),
            RepoError::Validation(msg) => ServiceError::ValidationFailed(msg),
            RepoError::NotFound(msg) | RepoError::Database(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<OutOfRangePage> for ServiceError {
    fn from(err: OutOfRangePage) -> Self {
        ServiceError::OutOfRangePage(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ValidationFailed(msg) => AppError::validation(msg),
            ServiceError::NotFound(entity) => {
                let code = if entity == "Employee" {
                    ErrorCode::EmployeeNotFound
                } else {
                    ErrorCode::NotFound
                };
                AppError::with_message(code, format!("{entity} not found"))
                    .with_detail("resource", entity)
            }
            ServiceError::UniquenessConflict(field) => {
                let code = match field.as_str() {
                    "email" => ErrorCode::EmployeeEmailExists,
                    "phone" => ErrorCode::EmployeePhoneExists,
                    _ => ErrorCode::AlreadyExists,
                };
                AppError::new(code).with_detail("field", field)
            }
            ServiceError::OutOfRangePage(o) => AppError::new(ErrorCode::EmployeePageOutOfRange)
                .with_detail("page", o.page)
                .with_detail("lastPage", o.last_page),
            ServiceError::PartialReassignmentFailure { item_id, reason } => {
                AppError::with_message(ErrorCode::ReassignmentFailed, reason)
                    .with_detail("itemId", item_id)
            }
            ServiceError::NoApproverAvailable => AppError::new(ErrorCode::NoApproverAvailable),
            ServiceError::Internal(cause) => {
                tracing::error!(cause = %cause, "Employee operation failed");
                AppError::internal("Internal server error")
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_field_code() {
        let err: ServiceError = RepoError::Duplicate("email".into()).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::EmployeeEmailExists);

        let app: AppError = ServiceError::UniquenessConflict("phone".into()).into();
        assert_eq!(app.code, ErrorCode::EmployeePhoneExists);
    }

    #[test]
    fn test_id_collision_is_internal() {
        let err: ServiceError = RepoError::Duplicate("id".into()).into();
        assert!(matches!(err, ServiceError::Internal(_)), "{err:?}");
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_internal_hides_cause() {
        let err: ServiceError = RepoError::Database("disk I/O error".into()).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
        assert!(!app.message.contains("disk"));
    }

    #[test]
    fn test_out_of_range_message() {
        let app: AppError = ServiceError::OutOfRangePage(OutOfRangePage {
            page: 5,
            last_page: 3,
        })
        .into();
        assert_eq!(app.code, ErrorCode::EmployeePageOutOfRange);
        assert_eq!(app.message, "Reached the end of the employees data");
    }
}
