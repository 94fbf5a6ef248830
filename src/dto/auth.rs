use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    validation::{Field, ValidationErrors, is_valid_email},
};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require(Field::Email, &self.email, "Please enter your email");
        errors.require(Field::Password, &self.password, "Please enter your password");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require(Field::Name, &self.name, "Please enter your name");
        errors.require(Field::Email, &self.email, "Please enter your email");
        if !errors.contains(Field::Email) && !is_valid_email(&self.email) {
            errors.add(Field::Email, "Please enter a valid email address");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                Field::Password,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}
