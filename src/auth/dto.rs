use serde::{Deserialize, Serialize};

use super::validation::{normalize_email, validate_login, validate_register, Violation};
use crate::users::{password::PlainPassword, NewUser, PublicUser};

/// Request body for user registration. Fields are optional so that a
/// missing field surfaces as a validation message rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<PlainPassword>,
}

impl RegisterRequest {
    /// Validates and normalizes the payload into store input.
    pub fn into_new_user(self) -> Result<NewUser, Violation> {
        validate_register(
            self.name.as_deref(),
            self.email.as_deref(),
            self.password.as_ref().map(PlainPassword::expose),
        )?;
        Ok(NewUser {
            name: self.name.unwrap_or_default().trim().to_string(),
            email: normalize_email(&self.email.unwrap_or_default()),
            password: self.password.unwrap_or_else(|| PlainPassword::new("")),
        })
    }
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<PlainPassword>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: PlainPassword,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<Credentials, Violation> {
        validate_login(
            self.email.as_deref(),
            self.password.as_ref().map(PlainPassword::expose),
        )?;
        Ok(Credentials {
            email: normalize_email(&self.email.unwrap_or_default()),
            password: self.password.unwrap_or_else(|| PlainPassword::new("")),
        })
    }
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: PublicUser,
}
