use crate::domain::charge::{ChargeReceipt, ChargeRequest, IdempotencyToken};
use crate::domain::ports::ChargeGateway;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// An in-process stand-in for the remote charge function.
///
/// Every request is recorded. Charges are keyed by idempotency token, so a
/// repeated token returns the original receipt instead of charging twice.
/// Failures can be scripted with [`InMemoryChargeGateway::fail_next`].
///
/// `Clone` shares the underlying state, so a test can keep a handle while the
/// orchestrator owns a boxed copy.
#[derive(Default, Clone)]
pub struct InMemoryChargeGateway {
    charges: Arc<RwLock<HashMap<IdempotencyToken, ChargeReceipt>>>,
    requests: Arc<RwLock<Vec<ChargeRequest>>>,
    failures: Arc<RwLock<VecDeque<String>>>,
    latency: Option<Duration>,
}

impl InMemoryChargeGateway {
    /// Creates a gateway that accepts every charge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the next charge fail with `message`. Calls queue up.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.failures.write().await.push_back(message.into());
    }

    /// All requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<ChargeRequest> {
        self.requests.read().await.clone()
    }

    /// Number of distinct charges actually made.
    pub async fn charge_count(&self) -> usize {
        self.charges.read().await.len()
    }
}

#[async_trait]
impl ChargeGateway for InMemoryChargeGateway {
    async fn make_charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        self.requests.write().await.push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(receipt) = self.charges.read().await.get(&request.idempotency) {
            debug!(idempotency = %request.idempotency, "Replaying charge for repeated token");
            return Ok(receipt.clone());
        }

        if let Some(message) = self.failures.write().await.pop_front() {
            return Err(CheckoutError::Charge(message));
        }

        let mut charges = self.charges.write().await;
        let receipt = ChargeReceipt {
            charge_id: format!("ch_{}", charges.len() + 1),
            amount: request.total,
            idempotency: request.idempotency.clone(),
        };
        charges.insert(request.idempotency.clone(), receipt.clone());
        Ok(receipt)
    }
}
