use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for user registration. Every field is optional on the wire
/// so that absent and `null` values both report as missing.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
}

/// A registration that passed field checks.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, AppError> {
        let (Some(name), Some(email), Some(password), Some(age)) = (
            present(self.name),
            present(self.email),
            present(self.password),
            self.age.filter(|&a| a != 0),
        ) else {
            return Err(AppError::MissingFields);
        };
        Ok(Registration {
            name,
            email,
            password,
            age,
        })
    }
}

// Only the empty string is absent; whitespace is a value.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Lookup parameters, read from the raw query pairs so repeated or stray
/// parameters never reject the request.
#[derive(Debug)]
pub struct LookupQuery {
    pub id: Option<String>,
}

impl LookupQuery {
    /// Keeps the first `id` value, like `URLSearchParams::get`.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs.into_iter().find(|(k, _)| k == "id").map(|(_, v)| v);
        Self { id }
    }

    /// The requested id, treating `?id=` as no id at all.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
