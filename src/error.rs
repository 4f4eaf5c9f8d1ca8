use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Cart is empty: add some items to your cart before placing order")]
    EmptyCart,
    #[error("A charge is already being submitted")]
    AlreadySubmitting,
    #[error("Unable to make charge: {0}")]
    Charge(String),
    #[error("Charge request timed out after {0:?}")]
    ChargeTimeout(Duration),
    #[error("Payment selection failed to load: {0}")]
    SelectionLoad(String),
    #[error("Shipping to {country:?} is not supported")]
    InvalidAddress { country: String },
    #[error("Unknown shipping method: {0}")]
    UnknownShippingMethod(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
