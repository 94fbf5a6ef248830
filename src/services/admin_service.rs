use crate::{
    client::{ApiClient, Auth},
    dto::{
        products::{CreateProductRequest, UpdateProductRequest},
        user::AdminUpdateUserRequest,
    },
    error::AppResult,
    guard::require_admin,
    models::{Product, User},
};

pub async fn list_users(api: &ApiClient) -> AppResult<Vec<User>> {
    require_admin(api.session()).await?;
    api.get("admin/get-all-users", Auth::Session).await
}

pub async fn list_products(api: &ApiClient) -> AppResult<Vec<Product>> {
    require_admin(api.session()).await?;
    api.get("admin/get-all-products", Auth::Session).await
}

pub async fn create_product(api: &ApiClient, payload: CreateProductRequest) -> AppResult<Product> {
    let admin = require_admin(api.session()).await?;
    payload.validate()?;
    let product: Product = api.post("admin/products", &payload, Auth::Session).await?;
    tracing::info!(admin_id = admin.id, product_id = product.id, "product created");
    Ok(product)
}

pub async fn update_product(
    api: &ApiClient,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    let admin = require_admin(api.session()).await?;
    payload.validate()?;
    let product: Product = api
        .put(&format!("admin/products/{id}"), &payload, Auth::Session)
        .await?;
    tracing::info!(admin_id = admin.id, product_id = id, "product updated");
    Ok(product)
}

pub async fn delete_product(api: &ApiClient, id: i64) -> AppResult<()> {
    let admin = require_admin(api.session()).await?;
    api.delete(&format!("admin/products/{id}"), Auth::Session)
        .await?;
    tracing::info!(admin_id = admin.id, product_id = id, "product deleted");
    Ok(())
}

pub async fn update_user(
    api: &ApiClient,
    id: i64,
    payload: AdminUpdateUserRequest,
) -> AppResult<User> {
    let admin = require_admin(api.session()).await?;
    let user: User = api
        .put(&format!("admin/users/{id}"), &payload, Auth::Session)
        .await?;
    tracing::info!(admin_id = admin.id, user_id = id, "user updated");
    Ok(user)
}

pub async fn delete_user(api: &ApiClient, id: i64) -> AppResult<()> {
    let admin = require_admin(api.session()).await?;
    api.delete(&format!("admin/users/{id}"), Auth::Session)
        .await?;
    tracing::info!(admin_id = admin.id, user_id = id, "user deleted");
    Ok(())
}
