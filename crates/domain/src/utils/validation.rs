//! Account form validation
//!
//! Screens show one message at a time: the first failing rule wins.

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{FormField, Result, StudyBuddyError};

/// Loose email shape check: an `@` and a `.` somewhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// At least [`MIN_PASSWORD_LENGTH`] characters, one of them a digit.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH && password.chars().any(|c| c.is_ascii_digit())
}

/// Login identifiers containing `@` are emails; anything else is a username.
#[must_use]
pub fn is_email_identifier(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Both login fields must be filled in.
///
/// # Errors
/// Returns a validation error flagging every blank field.
pub fn validate_login(identifier: &str, password: &str) -> Result<()> {
    let mut missing = Vec::new();
    if identifier.trim().is_empty() {
        missing.push(FormField::UsernameOrEmail);
    }
    if password.is_empty() {
        missing.push(FormField::Password);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StudyBuddyError::validation("Please fill in all fields.", missing))
    }
}

/// Sign-up rules in order: email shape, username, password policy, retype.
///
/// Every failing field is flagged; the message is the first failing rule's.
///
/// # Errors
/// Returns a validation error when any rule fails.
pub fn validate_sign_up(email: &str, username: &str, password: &str, retype: &str) -> Result<()> {
    let password_message =
        format!("Password must be at least {MIN_PASSWORD_LENGTH} characters and contain a number.");
    let rules = [
        (!is_valid_email(email.trim()), FormField::Email, "Invalid email address."),
        (username.trim().is_empty(), FormField::Username, "Username cannot be empty."),
        (!is_valid_password(password), FormField::Password, password_message.as_str()),
        (password != retype, FormField::RetypePassword, "Passwords do not match."),
    ];

    let failing: Vec<_> = rules.iter().filter(|(failed, _, _)| *failed).collect();
    match failing.first() {
        None => Ok(()),
        Some((_, _, message)) => Err(StudyBuddyError::validation(
            *message,
            failing.iter().map(|(_, field, _)| *field).collect::<Vec<_>>(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let err = validate_login("", "").unwrap_err();
        assert_eq!(err.user_message(), "Please fill in all fields.");
        assert_eq!(err.fields(), &[FormField::UsernameOrEmail, FormField::Password]);
        assert_eq!(validate_login("ada", "").unwrap_err().fields(), &[FormField::Password]);
        assert!(validate_login("ada", "secret1").is_ok());
    }

    #[test]
    fn sign_up_reports_first_failing_rule() {
        let message = |e: &str, u: &str, p: &str, r: &str| {
            validate_sign_up(e, u, p, r).map_err(|err| err.user_message())
        };
        assert_eq!(message("ada", "", "x", "y"), Err("Invalid email address.".to_string()));
        assert_eq!(message("ada@example.com", " ", "x", "y"), Err("Username cannot be empty.".to_string()));
        assert_eq!(
            message("ada@example.com", "ada", "abcdefg", "abcdefg"),
            Err("Password must be at least 6 characters and contain a number.".to_string())
        );
        assert_eq!(
            message("ada@example.com", "ada", "abc1", "abc1"),
            Err("Password must be at least 6 characters and contain a number.".to_string())
        );
        assert_eq!(message("ada@example.com", "ada", "secret1", "secret2"), Err("Passwords do not match.".to_string()));
        assert_eq!(message("ada@example.com", "ada", "secret1", "secret1"), Ok(()));
    }

    #[test]
    fn sign_up_flags_every_failing_field() {
        let err = validate_sign_up("ada", "", "x", "y").unwrap_err();
        assert_eq!(
            err.fields(),
            &[FormField::Email, FormField::Username, FormField::Password, FormField::RetypePassword]
        );
        let err = validate_sign_up("ada@example.com", "ada", "secret", "secret").unwrap_err();
        assert_eq!(err.fields(), &[FormField::Password]);
    }

    #[test]
    fn identifiers_with_at_sign_are_emails() {
        assert!(is_email_identifier("ada@example.com"));
        assert!(!is_email_identifier("ada"));
    }
}
