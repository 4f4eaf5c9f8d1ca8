//! Application layer coordinating the checkout flow.
//!
//! `CheckoutOrchestrator` turns payment provider callbacks and user actions
//! into cart mutations, charge requests and view updates. `CartListPresenter`
//! maps the cart onto list rows.

pub mod checkout;
pub mod presenter;
