use chrono::NaiveDate;

use super::entity::User;
use crate::domain::{DomainError, DomainResult};

/// Validates all User invariants against the given current date
pub fn validate_user(user: &User, today: NaiveDate) -> DomainResult<()> {
    validate_email(&user.email)?;
    validate_login(&user.login)?;
    validate_birthday(user.birthday, today)?;
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::InvariantViolation(format!(
            "Email '{}' must be non-empty and contain '@'",
            email
        )));
    }
    Ok(())
}

/// Login cannot be empty or contain whitespace
fn validate_login(login: &str) -> DomainResult<()> {
    if login.is_empty() || login.chars().any(char::is_whitespace) {
        return Err(DomainError::InvariantViolation(format!(
            "Login '{}' must be non-empty and contain no whitespace",
            login
        )));
    }
    Ok(())
}

fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if birthday > today {
        return Err(DomainError::InvariantViolation(format!(
            "Birthday {} is in the future",
            birthday
        )));
    }
    Ok(())
}
