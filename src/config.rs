//! Checkout configuration.
//!
//! Load order, later sources win:
//! 1. built-in defaults (US-only shipping, 2.9% + 30¢ processing fee)
//! 2. a TOML file, when a path is given
//! 3. `PRINTBEAT_*` environment variables
//!
//! ```toml
//! currency_symbol = "$"
//! customer_id = "cus_123"
//! charge_timeout_secs = 30
//!
//! [processing_fee]
//! kind = "fixed"
//! amount = 150
//!
//! [[shipping]]
//! country = "US"
//! default = "fedex"
//! methods = [
//!     { identifier = "ups_ground", label = "UPS Ground", detail = "Arrives in 3-5 days", amount = "0" },
//!     { identifier = "fedex", label = "FedEx", detail = "Arrives tomorrow", amount = "9.99" },
//! ]
//! ```

use crate::application::checkout::{CheckoutSettings, DEFAULT_CHARGE_TIMEOUT};
use crate::domain::cart::ProcessingFee;
use crate::domain::money::{Money, MoneyFormatter};
use crate::domain::shipping::{ShippingMethod, ShippingRateTable};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const ENV_CUSTOMER_ID: &str = "PRINTBEAT_CUSTOMER_ID";
pub const ENV_CHARGE_TIMEOUT_SECS: &str = "PRINTBEAT_CHARGE_TIMEOUT_SECS";
pub const ENV_CURRENCY_SYMBOL: &str = "PRINTBEAT_CURRENCY_SYMBOL";

/// A shipping method as written in the config file, priced in major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethodConfig {
    pub identifier: String,
    pub label: String,
    #[serde(default)]
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRegionConfig {
    pub country: String,
    pub default: String,
    pub methods: Vec<ShippingMethodConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub currency_symbol: String,
    pub customer_id: String,
    pub charge_timeout_secs: u64,
    pub processing_fee: ProcessingFee,
    pub shipping: Vec<ShippingRegionConfig>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            customer_id: String::new(),
            charge_timeout_secs: DEFAULT_CHARGE_TIMEOUT.as_secs(),
            processing_fee: ProcessingFee::default(),
            shipping: vec![ShippingRegionConfig {
                country: "US".to_string(),
                default: "fedex".to_string(),
                methods: vec![
                    ShippingMethodConfig {
                        identifier: "ups_ground".to_string(),
                        label: "UPS Ground".to_string(),
                        detail: "Arrives in 3-5 days".to_string(),
                        amount: Decimal::ZERO,
                    },
                    ShippingMethodConfig {
                        identifier: "fedex".to_string(),
                        label: "FedEx".to_string(),
                        detail: "Arrives tomorrow".to_string(),
                        amount: Decimal::new(999, 2),
                    },
                ],
            }],
        }
    }
}

impl CheckoutConfig {
    /// Loads defaults, then `path` if given, then environment overrides,
    /// and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                info!(?path, "Loading checkout config from file");
                Self::from_toml(&std::fs::read_to_string(path)?)?
            }
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `PRINTBEAT_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(customer_id) = lookup(ENV_CUSTOMER_ID) {
            debug!(%customer_id, "Overriding customer id from environment");
            self.customer_id = customer_id;
        }
        if let Some(raw) = lookup(ENV_CHARGE_TIMEOUT_SECS) {
            match raw.parse() {
                Ok(secs) => self.charge_timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid {ENV_CHARGE_TIMEOUT_SECS}"),
            }
        }
        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.currency_symbol = symbol;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.charge_timeout_secs == 0 {
            return Err(CheckoutError::Config(
                "charge_timeout_secs must be greater than 0".into(),
            ));
        }
        let negative_fee = match self.processing_fee {
            ProcessingFee::None => false,
            ProcessingFee::Fixed { amount } => amount.is_negative(),
            ProcessingFee::Percentage { flat, .. } => flat.is_negative(),
        };
        if negative_fee {
            return Err(CheckoutError::Config(
                "processing fee must not be negative".into(),
            ));
        }
        self.rate_table().map(|_| ())
    }

    /// Builds the shipping policy table from the configured regions.
    pub fn rate_table(&self) -> Result<ShippingRateTable> {
        let mut table = ShippingRateTable::new();
        for region in &self.shipping {
            let methods = region
                .methods
                .iter()
                .map(|m| {
                    Ok(ShippingMethod::new(
                        m.identifier.clone(),
                        m.label.clone(),
                        m.detail.clone(),
                        Money::from_major(m.amount)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            table.insert_region(&region.country, methods, &region.default)?;
        }
        Ok(table)
    }

    pub fn settings(&self) -> Result<CheckoutSettings> {
        Ok(CheckoutSettings {
            customer_id: self.customer_id.clone(),
            charge_timeout: Duration::from_secs(self.charge_timeout_secs),
            formatter: MoneyFormatter::new(self.currency_symbol.clone()),
            rates: self.rate_table()?,
        })
    }
}
