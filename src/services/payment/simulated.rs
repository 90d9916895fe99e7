use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::PaymentGateway;
use crate::models::{Payment, PaymentStatus};

/// Stand-in for a real gateway: waits a fixed processing delay, then
/// declines 1 attempt in 10 from a uniform draw. There is no idempotency
/// key and no asynchronous confirmation path.
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn settle(&self, _payment: &Payment) -> anyhow::Result<PaymentStatus> {
        tokio::time::sleep(self.delay).await;

        let declined = rand::thread_rng().gen_range(0..10) == 0;
        Ok(if declined {
            PaymentStatus::Failed
        } else {
            PaymentStatus::Completed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_payment() -> Payment {
        Payment {
            id: "pay-1".to_string(),
            booking_id: "bk-1".to_string(),
            client_id: "client-001".to_string(),
            client_name: "John Doe".to_string(),
            amount: 100.0,
            payment_method: crate::models::PaymentMethod::Cash,
            status: PaymentStatus::Pending,
            transaction_id: "TXN1".to_string(),
            created_at: 0,
            processed_at: 0,
        }
    }

    #[tokio::test]
    async fn test_failure_rate_is_roughly_ten_percent() {
        let gateway = SimulatedGateway::new(0);
        let payment = dummy_payment();

        let mut failed = 0;
        for _ in 0..2000 {
            if gateway.settle(&payment).await.unwrap() == PaymentStatus::Failed {
                failed += 1;
            }
        }

        // Expect ~200 failures; the window is wide enough to keep the test stable
        assert!(
            (120..=280).contains(&failed),
            "failure count {failed} outside expected band"
        );
    }

    #[tokio::test]
    async fn test_outcome_is_terminal() {
        let gateway = SimulatedGateway::new(0);
        let payment = dummy_payment();
        for _ in 0..50 {
            let status = gateway.settle(&payment).await.unwrap();
            assert!(matches!(
                status,
                PaymentStatus::Completed | PaymentStatus::Failed
            ));
        }
    }
}
