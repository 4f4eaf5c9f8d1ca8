use crate::application::presenter::CartListPresenter;
use crate::domain::cart::CartState;
use crate::domain::charge::{ChargeReceipt, ChargeRequest};
use crate::domain::money::{Money, MoneyFormatter};
use crate::domain::ports::{
    Alert, AlertAction, ChargeGatewayBox, CheckoutViewBox, TotalsDisplay, ViewEvent,
};
use crate::domain::product::Product;
use crate::domain::shipping::{Address, ShippingMethod, ShippingQuote, ShippingRateTable};
use crate::error::{CheckoutError, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Label shown while no payment or shipping method is chosen.
pub const SELECT_METHOD_LABEL: &str = "Select Method";

pub const DEFAULT_CHARGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Lifecycle of one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    AwaitingSelection,
    Submitting,
    Succeeded,
    Failed,
    Cancelled,
}

/// Terminal status reported by the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Success,
    Error,
    UserCancellation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub label: String,
}

impl PaymentMethod {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// The payment provider's current choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub payment_method: Option<PaymentMethod>,
    pub shipping_method: Option<ShippingMethod>,
}

/// Everything the orchestrator needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub customer_id: String,
    pub charge_timeout: Duration,
    pub formatter: MoneyFormatter,
    pub rates: ShippingRateTable,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            charge_timeout: DEFAULT_CHARGE_TIMEOUT,
            formatter: MoneyFormatter::default(),
            rates: ShippingRateTable::domestic(),
        }
    }
}

/// Drives a checkout from the opened cart to a settled charge.
///
/// The orchestrator never owns the cart: every operation that reads or
/// mutates it borrows the caller's [`CartState`]. Payment provider callbacks
/// arrive as method calls, and everything meant for the screen goes out
/// through the injected [`crate::domain::ports::CheckoutView`].
pub struct CheckoutOrchestrator {
    gateway: ChargeGatewayBox,
    view: CheckoutViewBox,
    settings: CheckoutSettings,
    state: CheckoutState,
    in_flight: Option<ChargeRequest>,
}

impl CheckoutOrchestrator {
    /// Creates a new `CheckoutOrchestrator` in the `Idle` state.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The remote charge endpoint.
    /// * `view` - Sink for display updates and alerts.
    /// * `settings` - Customer, timeout, currency and shipping policy.
    pub fn new(gateway: ChargeGatewayBox, view: CheckoutViewBox, settings: CheckoutSettings) -> Self {
        Self {
            gateway,
            view,
            settings,
            state: CheckoutState::Idle,
            in_flight: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// The request currently awaiting a response, if any.
    pub fn in_flight(&self) -> Option<&ChargeRequest> {
        self.in_flight.as_ref()
    }

    /// Amount the payment provider should collect for `cart`.
    pub fn payment_amount(&self, cart: &CartState) -> Result<Money> {
        cart.total()
    }

    /// Shows the checkout screen for `cart`.
    pub fn open(&mut self, cart: &CartState) {
        self.transition(CheckoutState::Idle);
        self.view.notify(ViewEvent::Activity(false));
        self.render(cart);
    }

    /// Handles a change of payment or shipping method.
    ///
    /// A selected shipping method's amount becomes the cart's shipping fee.
    /// While a charge is in flight the shipping fee is frozen, so the cart
    /// keeps matching the submitted total.
    pub fn selection_changed(&mut self, cart: &mut CartState, selection: &Selection) -> Result<()> {
        let payment_label = selection
            .payment_method
            .as_ref()
            .map_or(SELECT_METHOD_LABEL, |method| method.label.as_str());
        self.view
            .notify(ViewEvent::PaymentMethodLabel(payment_label.to_string()));

        match &selection.shipping_method {
            Some(method) if self.state == CheckoutState::Submitting => {
                warn!(method = %method.identifier, "Shipping change ignored while submitting");
            }
            Some(method) => {
                cart.set_shipping_fee(method.amount)?;
                self.view
                    .notify(ViewEvent::ShippingMethodLabel(method.label.clone()));
                self.render(cart);
            }
            None if self.state == CheckoutState::Submitting => {}
            None => self
                .view
                .notify(ViewEvent::ShippingMethodLabel(SELECT_METHOD_LABEL.to_string())),
        }

        if self.state != CheckoutState::Submitting {
            self.transition(CheckoutState::AwaitingSelection);
        }
        Ok(())
    }

    /// Answers the payment provider when the shipping address changes.
    ///
    /// Rejections go back to the provider, which prompts for a correction;
    /// no alert is raised here.
    pub fn shipping_address_changed(&self, address: &Address) -> Result<ShippingQuote> {
        self.settings.rates.quote(address).inspect_err(|_| {
            warn!(country = %address.country, "Shipping address rejected");
        })
    }

    /// Reports that the payment provider could not load.
    ///
    /// The user is offered to leave checkout or to reload the provider.
    pub fn selection_load_failed(&self, message: impl Into<String>) -> CheckoutError {
        let message = message.into();
        warn!(%message, "Payment selection failed to load");
        self.view.notify(ViewEvent::Alert(
            Alert::new("Error", message.clone())
                .with_actions(vec![AlertAction::Cancel, AlertAction::Retry]),
        ));
        CheckoutError::SelectionLoad(message)
    }

    /// Starts a charge attempt and returns the request to send.
    ///
    /// Rejected while another attempt is in flight, for an empty cart, and
    /// for a total that is not positive or does not fit in minor units. A
    /// rejection leaves the state untouched. Each call mints a new
    /// idempotency token.
    pub fn begin_submission(&mut self, cart: &CartState) -> Result<ChargeRequest> {
        if self.state == CheckoutState::Submitting {
            return Err(CheckoutError::AlreadySubmitting);
        }
        if cart.is_empty() {
            self.view.notify(ViewEvent::Alert(Alert::new(
                "Cart is empty",
                "Add some items to your cart before placing order",
            )));
            return Err(CheckoutError::EmptyCart);
        }

        let total = cart
            .total()
            .and_then(|total| {
                if total > Money::ZERO {
                    Ok(total)
                } else {
                    Err(CheckoutError::InvalidAmount(format!(
                        "cannot charge a total of {}",
                        self.settings.formatter.format(total)
                    )))
                }
            })
            .inspect_err(|e| {
                warn!(error = %e, "Charge not submitted");
                self.view
                    .notify(ViewEvent::Alert(Alert::new("Error", e.to_string())));
            })?;

        let request = ChargeRequest::new(total, self.settings.customer_id.clone());
        info!(
            total = request.total.minor_units(),
            idempotency = %request.idempotency,
            "Submitting charge"
        );
        self.in_flight = Some(request.clone());
        self.transition(CheckoutState::Submitting);
        self.view.notify(ViewEvent::Activity(true));
        Ok(request)
    }

    /// Applies the charge response to the cart and the screen.
    pub fn complete_submission(
        &mut self,
        cart: &mut CartState,
        outcome: Result<ChargeReceipt>,
    ) -> Result<ChargeReceipt> {
        self.in_flight = None;
        match outcome {
            Ok(receipt) => {
                info!(charge_id = %receipt.charge_id, "Charge succeeded");
                cart.clear();
                self.transition(CheckoutState::Succeeded);
                self.view.notify(ViewEvent::ReloadItems);
                self.render(cart);
                Ok(receipt)
            }
            Err(e) => {
                let e = match e {
                    CheckoutError::Charge(_) | CheckoutError::ChargeTimeout(_) => e,
                    other => CheckoutError::Charge(other.to_string()),
                };
                warn!(error = %e, "Charge failed");
                self.transition(CheckoutState::Failed);
                self.view
                    .notify(ViewEvent::Alert(Alert::new("Error", "Unable to make charge")));
                Err(e)
            }
        }
    }

    /// Submits the cart total to the charge endpoint and waits for the
    /// response, bounded by the configured timeout.
    pub async fn submit(&mut self, cart: &mut CartState) -> Result<ChargeReceipt> {
        let request = self.begin_submission(cart)?;
        let timeout = self.settings.charge_timeout;
        let outcome = match tokio::time::timeout(timeout, self.gateway.make_charge(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(CheckoutError::ChargeTimeout(timeout)),
        };
        self.complete_submission(cart, outcome)
    }

    /// Handles the payment provider's final status for the attempt.
    pub fn did_finish(&mut self, status: PaymentStatus, error: Option<&str>) {
        match status {
            PaymentStatus::Success => {
                self.view.notify(ViewEvent::Activity(false));
                self.view.notify(ViewEvent::Alert(Alert::new(
                    "Success",
                    "Thank you for your purchase",
                )));
                self.transition(CheckoutState::Succeeded);
            }
            PaymentStatus::Error => {
                self.view.notify(ViewEvent::Activity(false));
                self.view
                    .notify(ViewEvent::Alert(Alert::new("Error", error.unwrap_or_default())));
                self.transition(CheckoutState::Failed);
            }
            PaymentStatus::UserCancellation => {
                self.in_flight = None;
                self.transition(CheckoutState::Cancelled);
                self.transition(CheckoutState::Idle);
            }
        }
    }

    /// The user dismissed the last alert.
    ///
    /// After a failure checkout goes back to `Idle` so the user can retry.
    /// After a success the screen closes.
    pub fn acknowledge(&mut self, cart: &mut CartState) {
        match self.state {
            CheckoutState::Failed => self.transition(CheckoutState::Idle),
            CheckoutState::Succeeded => self.dismiss(cart),
            _ => {}
        }
    }

    /// Removes a cart row on the user's request and refreshes the totals.
    ///
    /// Returns the deleted row index, or `None` if the product was no longer
    /// in the cart.
    pub fn remove_item(
        &mut self,
        cart: &mut CartState,
        presenter: &CartListPresenter,
        product: &Product,
    ) -> Option<usize> {
        let index = presenter.remove_row(cart, product)?;
        debug!(product = %product.id, index, "Removed cart row");
        self.view.notify(ViewEvent::DeleteRow(index));
        self.render(cart);
        Some(index)
    }

    /// Tears the checkout screen down. The chosen shipping fee does not
    /// outlive the screen.
    pub fn dismiss(&mut self, cart: &mut CartState) {
        cart.reset_shipping_fee();
        self.transition(CheckoutState::Idle);
        self.view.notify(ViewEvent::Dismiss);
    }

    fn render(&self, cart: &CartState) {
        match cart.totals() {
            Ok(totals) => {
                let formatter = &self.settings.formatter;
                self.view.notify(ViewEvent::Totals(TotalsDisplay {
                    subtotal: formatter.format(totals.subtotal),
                    processing_fee: formatter.format(totals.processing_fee),
                    shipping_fee: formatter.format(totals.shipping_fee),
                    total: formatter.format(totals.total),
                }));
                self.view.notify(ViewEvent::PaymentAmount(totals.total));
            }
            // submission rejects the same cart, so nothing can be charged
            Err(e) => warn!(error = %e, "Cart totals unavailable"),
        }
        self.view.notify(ViewEvent::EmptyCart(cart.is_empty()));
    }

    fn transition(&mut self, next: CheckoutState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "Checkout state change");
            self.state = next;
        }
    }
}
