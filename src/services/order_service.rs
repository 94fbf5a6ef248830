use crate::{
    checkout::{OrderDraft, ProcessingStage, SuccessStage},
    client::{ApiClient, Auth},
    dto::orders::CreateOrderRequest,
    error::{AppError, AppResult},
    models::{Order, Voucher},
    state::AppState,
    validation::{Field, ValidationErrors},
};

pub async fn find_voucher(api: &ApiClient, code: &str) -> AppResult<Voucher> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::Validation(ValidationErrors::single(
            Field::VoucherCode,
            "Please enter a voucher code",
        )));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(ValidationErrors::single(
            Field::VoucherCode,
            "Voucher code is not valid",
        )));
    }
    api.get(&format!("vouchers/code/{code}"), Auth::Session)
        .await
}

/// Submits the draft. Totals are the client's provisional figures; the
/// returned order is what history screens should display.
pub async fn place_order(api: &ApiClient, draft: &OrderDraft) -> AppResult<Order> {
    let payload = CreateOrderRequest::from(draft);
    let order: Order = api.post("orders", &payload, Auth::Session).await?;
    tracing::info!(
        order_id = order.id,
        total_payment = order.total_payment,
        "order placed"
    );
    Ok(order)
}

pub async fn list_orders(api: &ApiClient) -> AppResult<Vec<Order>> {
    api.get("orders", Auth::Session).await
}

/// Places the order, runs the processing stage and empties the cart.
///
/// The cart is cleared only once the backend has accepted the order.
pub async fn confirm_order(
    state: &AppState,
    processing: ProcessingStage,
) -> AppResult<(SuccessStage, Order)> {
    let order = place_order(&state.api, processing.draft()).await?;
    let success = processing
        .complete(state.config.processing_delay, &state.session)
        .await;
    state.cart.clear();
    Ok((success, order))
}
