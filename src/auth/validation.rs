//! Payload rules for register and login.
//!
//! Checks run in field order (name, email, password) and stop at the first
//! violation. Login only requires a password to be present; the length
//! floor applies to registration alone.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

/// First rule a payload broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub message: &'static str,
}

impl Violation {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims and lower-cases an email so lookups and uniqueness are case-insensitive.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn check_name(name: Option<&str>) -> Result<(), Violation> {
    let name = name.map(str::trim).unwrap_or_default();
    let len = name.chars().count();
    if len == 0 {
        return Err(Violation::new(Field::Name, "Name is required"));
    }
    if len < NAME_MIN {
        return Err(Violation::new(
            Field::Name,
            "Name must be at least 2 characters",
        ));
    }
    if len > NAME_MAX {
        return Err(Violation::new(
            Field::Name,
            "Name cannot exceed 50 characters",
        ));
    }
    Ok(())
}

fn check_email(email: Option<&str>) -> Result<(), Violation> {
    let email = email.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(Violation::new(Field::Email, "Email is required"));
    }
    if !is_valid_email(email) {
        return Err(Violation::new(Field::Email, "Please provide a valid email"));
    }
    Ok(())
}

fn check_password(password: Option<&str>, min_len: Option<usize>) -> Result<(), Violation> {
    let password = password.unwrap_or_default();
    if password.is_empty() {
        return Err(Violation::new(Field::Password, "Password is required"));
    }
    if let Some(min) = min_len {
        if password.chars().count() < min {
            return Err(Violation::new(
                Field::Password,
                "Password must be at least 6 characters",
            ));
        }
    }
    Ok(())
}

pub fn validate_register(
    name: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), Violation> {
    check_name(name)?;
    check_email(email)?;
    check_password(password, Some(PASSWORD_MIN))
}

pub fn validate_login(email: Option<&str>, password: Option<&str>) -> Result<(), Violation> {
    check_email(email)?;
    check_password(password, None)
}
