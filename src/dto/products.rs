use serde::Serialize;

use crate::{
    error::AppResult,
    validation::{Field, ValidationErrors},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require(Field::Name, &self.name, "Product name is required");
        if self.price < 0 {
            errors.add(Field::Price, "Price cannot be negative");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.require(Field::Name, name, "Product name cannot be empty");
        }
        if self.price.is_some_and(|p| p < 0) {
            errors.add(Field::Price, "Price cannot be negative");
        }
        errors.into_result()
    }
}
