//! Input validation helpers
//!
//! Centralized text length constants and validation functions, plus the
//! per-command validators used by the employee service.

use crate::utils::AppError;
use shared::models::{EmployeeCreate, EmployeeUpdate};
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Person names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: employee code
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Phone digits, excluding an optional leading `+`
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("\"{field}\" must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "\"{field}\" is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "\"{field}\" is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    if !value.trim().validate_email() {
        return Err(AppError::validation("\"email\" must be a valid email"));
    }
    Ok(())
}

/// Optional leading `+`, then 10 to 15 ASCII digits.
pub fn validate_phone(value: &str) -> Result<(), AppError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let well_formed = (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(AppError::validation(format!(
            "\"phone\" must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"
        )));
    }
    Ok(())
}

/// Lookup key for an existing employee.
///
/// Looser than [`validate_phone`]: a key that no stored phone could match is
/// answered with "not found" rather than rejected.
pub fn validate_phone_key(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "phone", MAX_PHONE_DIGITS + 1)?;
    if value.chars().any(char::is_whitespace) {
        return Err(AppError::validation("\"phone\" must not contain whitespace"));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "\"password\" length must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

// ── Command validators ──────────────────────────────────────────────

pub fn validate_employee_create(cmd: &EmployeeCreate) -> Result<(), AppError> {
    validate_email(&cmd.email)?;
    validate_required_text(&cmd.name, "name", MAX_NAME_LEN)?;
    validate_phone(&cmd.phone)?;
    validate_optional_text(&cmd.employee_id, "employeeId", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&cmd.profile_image, "profileImage", MAX_URL_LEN)?;
    Ok(())
}

pub fn validate_employee_update(cmd: &EmployeeUpdate) -> Result<(), AppError> {
    if cmd.id <= 0 {
        return Err(AppError::validation("\"id\" must be a positive number"));
    }
    if cmd.name.is_none() && cmd.password.is_none() {
        return Err(AppError::validation(
            "at least one of \"name\" or \"password\" is required",
        ));
    }
    if let Some(name) = &cmd.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(password) = &cmd.password {
        validate_password(password)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;
    use shared::models::{Designation, UserType};

    fn create_cmd() -> EmployeeCreate {
        EmployeeCreate {
            email: "asha@example.com".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            designation: Designation::Manager,
            type_of_user: UserType::Approver,
            employee_id: Some("EMP-001".into()),
            profile_image: None,
        }
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("98765abc10").is_err());
        assert!(validate_phone("+").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_phone_key_rules() {
        assert!(validate_phone_key("9876543210").is_ok());
        assert!(validate_phone_key("nonexistent").is_ok());
        assert!(validate_phone_key("").is_err());
        assert!(validate_phone_key("98765 43210").is_err());
        assert!(validate_phone_key("12345678901234567").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("Asha@Example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("   ").is_err());
    }

    #[test]
    fn test_create_command() {
        assert!(validate_employee_create(&create_cmd()).is_ok());

        let mut cmd = create_cmd();
        cmd.name = "  ".into();
        let err = validate_employee_create(&cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_update_command() {
        let ok = EmployeeUpdate {
            id: 7,
            name: Some("Asha K".into()),
            password: None,
        };
        assert!(validate_employee_update(&ok).is_ok());

        let empty = EmployeeUpdate {
            id: 7,
            name: None,
            password: None,
        };
        assert!(validate_employee_update(&empty).is_err());

        let short_password = EmployeeUpdate {
            id: 7,
            name: None,
            password: Some("abc".into()),
        };
        assert!(validate_employee_update(&short_password).is_err());

        let bad_id = EmployeeUpdate {
            id: 0,
            name: Some("Asha".into()),
            password: None,
        };
        assert!(validate_employee_update(&bad_id).is_err());
    }
}
