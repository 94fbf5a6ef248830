use serde::Serialize;

use crate::{
    client::{ApiClient, Auth},
    error::AppResult,
    models::{Category, Combo, Product, ProductInCombo},
};

#[derive(Serialize)]
struct ComboTypeQuery<'a> {
    #[serde(rename = "type")]
    combo_type: &'a str,
}

pub async fn list_categories(api: &ApiClient) -> AppResult<Vec<Category>> {
    api.get("categories/listAll", Auth::Session).await
}

pub async fn list_combos(api: &ApiClient) -> AppResult<Vec<Combo>> {
    api.get("combos/listAll", Auth::Session).await
}

pub async fn products_by_category(api: &ApiClient, category_id: i64) -> AppResult<Vec<Product>> {
    api.get(&format!("products/searchByCategoryId/{category_id}"), Auth::Session)
        .await
}

pub async fn product_by_id(api: &ApiClient, id: i64) -> AppResult<Product> {
    api.get(&format!("products/searchById/{id}"), Auth::Session)
        .await
}

pub async fn combo_products(api: &ApiClient, combo_id: i64) -> AppResult<Vec<ProductInCombo>> {
    api.get(
        &format!("productincombos/searchByComboId/{combo_id}"),
        Auth::Session,
    )
    .await
}

pub async fn combos_by_type(api: &ApiClient, combo_type: &str) -> AppResult<Vec<Combo>> {
    api.get_with_query(
        "combos/searchByType",
        &ComboTypeQuery { combo_type },
        Auth::Session,
    )
    .await
}
