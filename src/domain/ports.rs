use super::charge::{ChargeReceipt, ChargeRequest};
use super::money::Money;
use crate::error::Result;
use async_trait::async_trait;

/// The remote charge endpoint.
///
/// Implementations must treat a repeated idempotency token as the same
/// charge. A rejected charge is reported as [`crate::error::CheckoutError::Charge`].
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    async fn make_charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt>;
}

pub type ChargeGatewayBox = Box<dyn ChargeGateway>;

/// Receives everything the checkout screen should display.
pub trait CheckoutView: Send + Sync {
    fn notify(&self, event: ViewEvent);
}

pub type CheckoutViewBox = Box<dyn CheckoutView>;

/// Cart amounts rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub processing_fee: String,
    pub shipping_fee: String,
    pub total: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Ok,
    /// Navigate away from checkout.
    Cancel,
    /// Reload the payment selection provider.
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            actions: vec![AlertAction::Ok],
        }
    }

    pub fn with_actions(mut self, actions: Vec<AlertAction>) -> Self {
        self.actions = actions;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Totals(TotalsDisplay),
    /// Amount the payment provider should collect.
    PaymentAmount(Money),
    PaymentMethodLabel(String),
    ShippingMethodLabel(String),
    EmptyCart(bool),
    Activity(bool),
    ReloadItems,
    DeleteRow(usize),
    Alert(Alert),
    Dismiss,
}

/// A view that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl CheckoutView for NullView {
    fn notify(&self, _event: ViewEvent) {}
}
