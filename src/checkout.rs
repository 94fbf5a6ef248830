//! Checkout pipeline: Form → Processing → Success.
//!
//! Each stage owns the value it was handed and nothing else, so any stage can
//! be built directly from an [`OrderDraft`] in tests. The draft is created
//! once, when the form is submitted, and later stages only read it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    cart::CartStore,
    error::{AppError, AppResult},
    models::{OrderItem, PaymentMethod, User, Voucher},
    session::SessionStore,
    validation::{Field, ValidationErrors, is_valid_email, is_valid_phone},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub house_number: String,
    pub street: String,
    pub ward: String,
    pub note: String,
}

/// Fields the shopper edits on the payment screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub recipient: Recipient,
    pub address: DeliveryAddress,
    pub payment_method: PaymentMethod,
    pub policy_accepted: bool,
}

impl CheckoutForm {
    /// Prefills the recipient from a signed-in profile.
    pub fn for_user(user: &User) -> Self {
        let (first_name, last_name) = match user.name.trim().rsplit_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (user.name.trim().to_string(), String::new()),
        };
        Self {
            recipient: Recipient {
                first_name,
                last_name,
                phone: user.phone.clone().unwrap_or_default(),
                email: user.email.clone(),
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        let Recipient {
            first_name,
            last_name,
            phone,
            email,
        } = &self.recipient;

        errors.require(Field::FirstName, first_name, "Please enter your first name");
        errors.require(Field::LastName, last_name, "Please enter your last name");
        errors.require(Field::Phone, phone, "Please enter your phone number");
        errors.require(Field::Email, email, "Please enter your email");
        errors.require(Field::HouseNumber, &self.address.house_number, "Please enter your house number");
        errors.require(Field::Street, &self.address.street, "Please enter your street");
        errors.require(Field::Ward, &self.address.ward, "Please enter your ward");

        if !errors.contains(Field::Phone) && !is_valid_phone(phone) {
            errors.add(Field::Phone, "Phone number must be 9 to 11 digits");
        }
        if !errors.contains(Field::Email) && !is_valid_email(email) {
            errors.add(Field::Email, "Please enter a valid email address");
        }
        if !self.policy_accepted {
            errors.add(Field::Policy, "Please accept the terms and policies to continue");
        }

        errors.into_result()
    }
}

/// Fee and discount computed outside the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pricing {
    pub delivery_fee: i64,
    pub voucher: Option<Voucher>,
}

/// Immutable record of what the shopper agreed to pay.
///
/// `total_payment` is fixed at construction to
/// `subtotal + delivery_fee - voucher.discount` and is never recomputed.
/// Every step saturates at the `i64` bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    recipient: Recipient,
    address: DeliveryAddress,
    payment_method: PaymentMethod,
    subtotal: i64,
    delivery_fee: i64,
    voucher: Option<Voucher>,
    total_payment: i64,
    order_items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new(
        recipient: Recipient,
        address: DeliveryAddress,
        payment_method: PaymentMethod,
        order_items: Vec<OrderItem>,
        pricing: Pricing,
    ) -> Self {
        let subtotal = order_items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total()));
        let discount = pricing.voucher.as_ref().map_or(0, |v| v.discount);
        let total_payment = subtotal
            .saturating_add(pricing.delivery_fee)
            .saturating_sub(discount);
        Self {
            recipient,
            address,
            payment_method,
            subtotal,
            delivery_fee: pricing.delivery_fee,
            voucher: pricing.voucher,
            total_payment,
            order_items,
        }
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn address(&self) -> &DeliveryAddress {
        &self.address
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    pub fn delivery_fee(&self) -> i64 {
        self.delivery_fee
    }

    pub fn voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref()
    }

    pub fn discount(&self) -> i64 {
        self.voucher.as_ref().map_or(0, |v| v.discount)
    }

    pub fn total_payment(&self) -> i64 {
        self.total_payment
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.order_items
    }
}

/// Initial stage. Submitting either advances or records field errors.
#[derive(Debug, Clone, Default)]
pub struct FormStage {
    form: CheckoutForm,
    errors: ValidationErrors,
}

impl FormStage {
    pub fn new(form: CheckoutForm) -> Self {
        Self {
            form,
            errors: ValidationErrors::new(),
        }
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Field errors from the last failed submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validates the form, snapshots the cart and builds the draft.
    ///
    /// On failure the stage keeps its form, records the field errors and
    /// returns them as [`AppError::Validation`].
    pub fn submit(&mut self, cart: &CartStore, pricing: Pricing) -> AppResult<ProcessingStage> {
        let mut errors = match self.form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(AppError::Validation(errors)) => errors,
            Err(other) => return Err(other),
        };

        let lines = cart.items();
        if lines.is_empty() {
            errors.add(Field::Items, "Your cart is empty");
        }
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "checkout form rejected");
            self.errors = errors.clone();
            return Err(AppError::Validation(errors));
        }
        self.errors = ValidationErrors::new();

        let items = lines.iter().map(OrderItem::from).collect();
        let draft = OrderDraft::new(
            self.form.recipient.clone(),
            self.form.address.clone(),
            self.form.payment_method,
            items,
            pricing,
        );
        tracing::info!(
            items = draft.order_items().len(),
            total_payment = draft.total_payment(),
            "order draft created"
        );
        Ok(ProcessingStage::new(draft))
    }
}

/// Transient stage shown while the order is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStage {
    draft: OrderDraft,
}

impl ProcessingStage {
    pub fn new(draft: OrderDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Waits `delay`, then hands the same draft to the success stage.
    pub async fn complete(self, delay: Duration, session: &SessionStore) -> SuccessStage {
        tokio::time::sleep(delay).await;
        let user = session.user().await;
        SuccessStage::new(self.draft, user.as_ref())
    }
}

/// Terminal, read-only stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessStage {
    draft: OrderDraft,
    authenticated: bool,
}

impl SuccessStage {
    pub fn new(draft: OrderDraft, user: Option<&User>) -> Self {
        Self {
            draft,
            authenticated: user.is_some(),
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Guests are offered to create an account after ordering.
    pub fn offers_account_creation(&self) -> bool {
        !self.authenticated
    }
}
