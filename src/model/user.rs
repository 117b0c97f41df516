//! Registered accounts.

use crate::error::FieldErrors;
use crate::model::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Payload for registering a user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

impl UserCreate {
    pub fn customer(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            is_staff: false,
        }
    }

    pub fn staff(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            is_staff: true,
            ..Self::customer(username, email)
        }
    }
}

/// Profile edits. Each form changes one field.
#[derive(Debug, Clone)]
pub enum UserUpdate {
    Email(String),
    Username(String),
}

pub(crate) fn check_username(username: &str, errors: &mut FieldErrors) {
    let username = username.trim();
    if username.is_empty() {
        errors.add("username", "Username is required.");
    } else if username.chars().count() < 4 {
        errors.add("username", "Username should be at least 4 characters long.");
    }
}

pub(crate) fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required.");
    } else if !email.contains('@') {
        errors.add("email", "Please enter a valid email address.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_username_is_rejected() {
        let mut errors = FieldErrors::new();
        check_username("bob", &mut errors);
        assert_eq!(
            errors.get("username"),
            Some("Username should be at least 4 characters long.")
        );
    }

    #[test]
    fn email_needs_an_at_sign() {
        let mut errors = FieldErrors::new();
        check_email("alice.example.com", &mut errors);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address."));

        let mut errors = FieldErrors::new();
        check_email("", &mut errors);
        assert_eq!(errors.get("email"), Some("Email is required."));
    }
}
