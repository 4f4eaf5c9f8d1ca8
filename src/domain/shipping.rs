use super::money::Money;
use crate::error::{CheckoutError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The part of a shipping address the rate policy looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl Address {
    pub fn in_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub identifier: String,
    pub label: String,
    /// Delivery estimate shown under the label.
    pub detail: String,
    pub amount: Money,
}

impl ShippingMethod {
    pub fn new(
        identifier: impl Into<String>,
        label: impl Into<String>,
        detail: impl Into<String>,
        amount: impl Into<Money>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
            detail: detail.into(),
            amount: amount.into(),
        }
    }
}

/// Options offered for an accepted address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingQuote {
    pub methods: Vec<ShippingMethod>,
    pub default: ShippingMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionRates {
    methods: Vec<ShippingMethod>,
    default: usize,
}

/// Shipping methods per destination country.
///
/// Countries missing from the table are rejected as invalid addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingRateTable {
    regions: HashMap<String, RegionRates>,
}

impl ShippingRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// US-only table: free ground shipping, or paid next-day as the default.
    pub fn domestic() -> Self {
        let mut table = Self::new();
        let methods = vec![
            ShippingMethod::new("ups_ground", "UPS Ground", "Arrives in 3-5 days", 0),
            ShippingMethod::new("fedex", "FedEx", "Arrives tomorrow", 999),
        ];
        table
            .regions
            .insert("US".to_string(), RegionRates { methods, default: 1 });
        table
    }

    /// Registers the methods offered for `country`, replacing any previous
    /// entry.
    pub fn insert_region(
        &mut self,
        country: &str,
        methods: Vec<ShippingMethod>,
        default: &str,
    ) -> Result<()> {
        let country = normalize_country(country);
        if country.is_empty() {
            return Err(CheckoutError::Config(
                "shipping region needs a country code".to_string(),
            ));
        }
        if methods.iter().any(|m| m.amount.is_negative()) {
            return Err(CheckoutError::InvalidAmount(format!(
                "negative shipping amount for {country}"
            )));
        }
        let default = methods
            .iter()
            .position(|m| m.identifier == default)
            .ok_or_else(|| CheckoutError::UnknownShippingMethod(default.to_string()))?;
        self.regions
            .insert(country, RegionRates { methods, default });
        Ok(())
    }

    pub fn supports(&self, address: &Address) -> bool {
        self.regions.contains_key(&normalize_country(&address.country))
    }

    /// Answers a shipping-address change with the options for its country.
    pub fn quote(&self, address: &Address) -> Result<ShippingQuote> {
        let rates = self
            .regions
            .get(&normalize_country(&address.country))
            .ok_or_else(|| CheckoutError::InvalidAddress {
                country: address.country.clone(),
            })?;
        Ok(ShippingQuote {
            methods: rates.methods.clone(),
            default: rates.methods[rates.default].clone(),
        })
    }

    /// Looks up one method offered for the address.
    pub fn method(&self, address: &Address, identifier: &str) -> Result<ShippingMethod> {
        self.quote(address)?
            .methods
            .into_iter()
            .find(|m| m.identifier == identifier)
            .ok_or_else(|| CheckoutError::UnknownShippingMethod(identifier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn normalize_country(country: &str) -> String {
    country.trim().to_ascii_uppercase()
}
