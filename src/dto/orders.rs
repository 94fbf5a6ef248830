use serde::Serialize;

use crate::{
    checkout::OrderDraft,
    models::{OrderItem, PaymentMethod},
};

/// Body of `POST /orders`, built from a submitted draft.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub house_number: String,
    pub street: String,
    pub ward: String,
    pub note: String,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub delivery_fee: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_code: Option<String>,
    pub discount: i64,
    pub total_payment: i64,
    pub order_items: Vec<OrderItem>,
}

impl From<&OrderDraft> for CreateOrderRequest {
    fn from(draft: &OrderDraft) -> Self {
        let recipient = draft.recipient().clone();
        let address = draft.address().clone();
        Self {
            first_name: recipient.first_name,
            last_name: recipient.last_name,
            phone: recipient.phone,
            email: recipient.email,
            house_number: address.house_number,
            street: address.street,
            ward: address.ward,
            note: address.note,
            payment_method: draft.payment_method(),
            subtotal: draft.subtotal(),
            delivery_fee: draft.delivery_fee(),
            voucher_code: draft.voucher().map(|v| v.code.clone()),
            discount: draft.discount(),
            total_payment: draft.total_payment(),
            order_items: draft.order_items().to_vec(),
        }
    }
}
