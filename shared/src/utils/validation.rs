//! Common validation utilities for inbound account data.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]{3,30}$").unwrap()
});

/// Validation error with field-level details
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collection of validation errors gathered across fields
#[derive(Debug, Default)]
pub struct ValidationIssues {
    issues: Vec<ValidationIssue>,
}

impl ValidationIssues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for issue in &self.issues {
            field_errors
                .entry(issue.field.clone())
                .or_default()
                .push(issue.message.clone());
        }
        field_errors
    }
}

/// Check that a string looks like an email address
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL_RE.is_match(value)
}

/// Check that a username is 3-30 chars of letters, digits, `_`, `.` or `-`
pub fn is_valid_username(value: &str) -> bool {
    USERNAME_RE.is_match(value)
}

/// Password strength policy: 8-32 chars with upper, lower, digit and symbol.
pub fn check_password_strength(value: &str) -> Result<(), &'static str> {
    if value.len() < 8 {
        return Err("password must be at least 8 characters");
    }
    if value.len() > 32 {
        return Err("password must be at most 32 characters");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("password must contain an uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("password must contain a lowercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain a digit");
    }
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("password must contain a symbol");
    }
    Ok(())
}
