//! Settlement gateways.
//!
//! A gateway decides whether a payment attempt is charged successfully.
//! Production uses [`RandomSettlement`] in place of a card network; tests
//! inject [`FixedSettlement`] for deterministic outcomes.

use async_trait::async_trait;
use rand::Rng;

/// Default probability that a simulated settlement is approved.
pub const DEFAULT_APPROVAL_RATE: f64 = 0.8;

/// What the gateway is asked to charge.
#[derive(Debug, Clone)]
pub struct SettlementRequest {
    pub invoice_id: String,
    pub amount: i64,
    pub currency: String,
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    Approved,
    Declined,
}

#[async_trait]
pub trait SettlementGateway: Send + Sync {
    async fn settle(&self, request: &SettlementRequest) -> SettlementOutcome;
}

/// Approves each attempt independently with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct RandomSettlement {
    approval_rate: f64,
}

impl RandomSettlement {
    /// Creates a gateway approving with `approval_rate`, clamped to `[0, 1]`.
    /// A NaN rate never approves.
    pub fn new(approval_rate: f64) -> Self {
        let approval_rate = if approval_rate.is_nan() {
            0.0
        } else {
            approval_rate.clamp(0.0, 1.0)
        };
        Self { approval_rate }
    }

    pub fn approval_rate(&self) -> f64 {
        self.approval_rate
    }
}

impl Default for RandomSettlement {
    fn default() -> Self {
        Self::new(DEFAULT_APPROVAL_RATE)
    }
}

#[async_trait]
impl SettlementGateway for RandomSettlement {
    async fn settle(&self, _request: &SettlementRequest) -> SettlementOutcome {
        if rand::thread_rng().gen_bool(self.approval_rate) {
            SettlementOutcome::Approved
        } else {
            SettlementOutcome::Declined
        }
    }
}

/// Always returns the same outcome.
#[derive(Debug, Clone, Copy)]
pub struct FixedSettlement(pub SettlementOutcome);

impl FixedSettlement {
    pub fn approve() -> Self {
        Self(SettlementOutcome::Approved)
    }

    pub fn decline() -> Self {
        Self(SettlementOutcome::Declined)
    }
}

#[async_trait]
impl SettlementGateway for FixedSettlement {
    async fn settle(&self, _request: &SettlementRequest) -> SettlementOutcome {
        self.0
    }
}
