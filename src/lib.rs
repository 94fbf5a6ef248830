//! Client core for the food-ordering storefront: cart, checkout pipeline,
//! persisted session and typed access to the REST backend.

pub mod cart;
pub mod checkout;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod response;
pub mod services;
pub mod session;
pub mod state;
pub mod subscription;
pub mod validation;
