//! Numeric error codes
//!
//! - 0xxx: request level (validation, generic lookups)
//! - 8xxx: employees and workload
//! - 9xxx: system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized as a bare number in the envelope's `code` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,

    EmployeeNotFound = 8001,
    EmployeeEmailExists = 8002,
    EmployeePhoneExists = 8003,
    /// Requested page lies past the end of the employee list
    EmployeePageOutOfRange = 8004,
    /// A work item could not be moved to another approver
    ReassignmentFailed = 8101,
    NoApproverAvailable = 8102,

    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Failures the caller cannot fix by changing the request
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Input validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Email is already registered",
            ErrorCode::EmployeePhoneExists => "Phone is already registered",
            ErrorCode::EmployeePageOutOfRange => "Reached the end of the employees data",
            ErrorCode::ReassignmentFailed => "Work item reassignment failed",
            ErrorCode::NoApproverAvailable => "No approver available for reassignment",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            8001 => ErrorCode::EmployeeNotFound,
            8002 => ErrorCode::EmployeeEmailExists,
            8003 => ErrorCode::EmployeePhoneExists,
            8004 => ErrorCode::EmployeePageOutOfRange,
            8101 => ErrorCode::ReassignmentFailed,
            8102 => ErrorCode::NoApproverAvailable,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
