//! User domain models and DTOs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Width of the `users.login` column.
pub const MAX_LOGIN_CHARS: usize = 255;

/// bcrypt ignores input past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

fn login_fits_column(login: &str) -> Result<(), ValidationError> {
    if login.chars().count() > MAX_LOGIN_CHARS {
        return Err(ValidationError::new("login_too_long")
            .with_message(Cow::Borrowed("login must be at most 255 characters")));
    }
    Ok(())
}

fn password_fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message(Cow::Borrowed("password must be at most 72 bytes")));
    }
    Ok(())
}

/// System roles. The discriminants are the ids stored in the `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin = 1,
    User = 2,
}

impl Role {
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::User),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// A stored user. Never sent to clients; listings use [`UserWithRole`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub role_id: i32,
}

/// A user ready to be inserted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub role: Role,
}

/// A user joined with the name of its role, as listed by `/user/api/getAll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserWithRole {
    pub id: i32,
    pub login: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginUserRequest {
    #[validate(
        length(min = 1, message = "login is required"),
        custom(function = "login_fits_column")
    )]
    pub login: String,
    #[validate(
        length(min = 1, message = "password is required"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(
        length(min = 1, message = "login is required"),
        custom(function = "login_fits_column")
    )]
    pub login: String,
    #[validate(
        length(min = 1, message = "password is required"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
}
