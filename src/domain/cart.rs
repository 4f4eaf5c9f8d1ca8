use super::money::Money;
use super::product::Product;
use crate::error::{CheckoutError, Result};
use serde::{Deserialize, Serialize};

/// How the processing fee is derived from the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessingFee {
    /// No processing fee is charged.
    None,
    /// A constant fee, whatever the cart holds.
    Fixed { amount: Money },
    /// The card processor's cut: `subtotal * rate_bps / 10_000 + flat`,
    /// truncated, and zero for an empty subtotal.
    Percentage { rate_bps: u32, flat: Money },
}

impl Default for ProcessingFee {
    /// 2.9% + 30¢.
    fn default() -> Self {
        Self::Percentage {
            rate_bps: 290,
            flat: Money::from_minor(30),
        }
    }
}

impl ProcessingFee {
    pub fn fee_for(&self, subtotal: Money) -> Result<Money> {
        match *self {
            ProcessingFee::None => Ok(Money::ZERO),
            ProcessingFee::Fixed { amount } => Ok(amount),
            ProcessingFee::Percentage { rate_bps, flat } => {
                if subtotal == Money::ZERO {
                    return Ok(Money::ZERO);
                }
                let cut = i128::from(subtotal.minor_units()) * i128::from(rate_bps) / 10_000;
                let cut = i64::try_from(cut).map_err(|_| {
                    CheckoutError::InvalidAmount(format!("processing fee {cut} is out of range"))
                })?;
                Money::from_minor(cut).try_add(flat)
            }
        }
    }
}

/// A snapshot of the cart's derived amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub processing_fee: Money,
    pub shipping_fee: Money,
    pub total: Money,
}

/// The shopping session's cart.
///
/// Items keep insertion order and may repeat. Every amount except the
/// shipping fee is derived on demand from the items, so no total can drift
/// from its components. Derived amounts fail with
/// [`CheckoutError::InvalidAmount`] when they leave the `i64` range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<Product>,
    shipping_fee: Money,
    processing_fee: ProcessingFee,
}

impl CartState {
    pub fn new(processing_fee: ProcessingFee) -> Self {
        Self {
            items: Vec::new(),
            shipping_fee: Money::ZERO,
            processing_fee,
        }
    }

    /// Appends a product to the end of the cart.
    pub fn add_item(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Removes the first entry with the same identifier as `product`.
    ///
    /// Returns `false` and leaves the cart untouched if no entry matches.
    pub fn remove_item(&mut self, product: &Product) -> bool {
        match self.position(product) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the cart and resets the shipping fee. The processing fee
    /// policy is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.shipping_fee = Money::ZERO;
    }

    pub fn set_shipping_fee(&mut self, amount: Money) -> Result<()> {
        if amount.is_negative() {
            return Err(CheckoutError::InvalidAmount(format!(
                "shipping fee must not be negative, got {}",
                amount.minor_units()
            )));
        }
        self.shipping_fee = amount;
        Ok(())
    }

    pub fn reset_shipping_fee(&mut self) {
        self.shipping_fee = Money::ZERO;
    }

    pub fn set_processing_fee(&mut self, policy: ProcessingFee) {
        self.processing_fee = policy;
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.items.get(index)
    }

    pub fn position(&self, product: &Product) -> Option<usize> {
        self.items.iter().position(|item| item == product)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> Result<Money> {
        Money::try_sum(self.items.iter().map(|item| item.price))
    }

    pub fn processing_fee(&self) -> Result<Money> {
        self.processing_fee.fee_for(self.subtotal()?)
    }

    pub fn processing_fee_policy(&self) -> ProcessingFee {
        self.processing_fee
    }

    pub fn shipping_fee(&self) -> Money {
        self.shipping_fee
    }

    pub fn total(&self) -> Result<Money> {
        Ok(self.totals()?.total)
    }

    pub fn totals(&self) -> Result<CartTotals> {
        let subtotal = self.subtotal()?;
        let processing_fee = self.processing_fee.fee_for(subtotal)?;
        Ok(CartTotals {
            subtotal,
            processing_fee,
            shipping_fee: self.shipping_fee,
            total: Money::try_sum([subtotal, processing_fee, self.shipping_fee])?,
        })
    }
}
