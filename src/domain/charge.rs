use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Single-use key that lets the backend recognise a repeated request.
///
/// 32 lowercase hex characters (a v4 UUID without hyphens).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyToken(String);

impl IdempotencyToken {
    /// Mints a fresh token. Every submission attempt gets its own.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload sent to the remote `makeCharge` function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub total: Money,
    pub customer_id: String,
    pub idempotency: IdempotencyToken,
}

impl ChargeRequest {
    pub fn new(total: Money, customer_id: impl Into<String>) -> Self {
        Self {
            total,
            customer_id: customer_id.into(),
            idempotency: IdempotencyToken::generate(),
        }
    }
}

/// Backend acknowledgement of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    pub charge_id: String,
    pub amount: Money,
    pub idempotency: IdempotencyToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let token = IdempotencyToken::generate();
        assert_eq!(token.as_str().len(), 32);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let tokens: HashSet<IdempotencyToken> =
            (0..1000).map(|_| IdempotencyToken::generate()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_request_wire_format() {
        let request = ChargeRequest::new(Money::from_minor(4649), "cus_123");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "total": 4649,
                "customerId": "cus_123",
                "idempotency": request.idempotency.as_str(),
            })
        );
    }
}
