use anyhow::Result;
use uuid::Uuid;

/// Delivers the payment-failed customer notification as a webhook to the
/// notification subsystem. With no target configured the effect is a logged
/// no-op; a delivery failure propagates so the engine reports the effect as
/// pending instead of losing it.
#[derive(Clone)]
pub struct PaymentFailedNotifier {
    pub client: reqwest::Client,
    pub target_url: Option<String>,
}

impl PaymentFailedNotifier {
    pub async fn send(&self, customer_id: Uuid, subscription_id: Option<Uuid>) -> Result<()> {
        let Some(url) = &self.target_url else {
            tracing::debug!(customer_id = %customer_id, "no notification endpoint configured");
            return Ok(());
        };

        let payload = serde_json::json!({
            "customer_id": customer_id,
            "subscription_id": subscription_id,
        });

        self.client
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-Event-Type", "payment.failed")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
