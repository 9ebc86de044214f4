use crate::domain::invoice::InvoiceStatus;
use crate::engine::EffectDispatcher;
use crate::repo::invoices_repo::InvoicesRepo;
use crate::repo::subscriptions_repo::SubscriptionsRepo;
use crate::service::notifier::PaymentFailedNotifier;
use anyhow::Result;
use uuid::Uuid;

/// Concrete dispatcher over the subscription/invoice tables and the
/// notification webhook.
#[derive(Clone)]
pub struct EffectExecutor {
    pub subscriptions_repo: SubscriptionsRepo,
    pub invoices_repo: InvoicesRepo,
    pub notifier: PaymentFailedNotifier,
}

#[async_trait::async_trait]
impl EffectDispatcher for EffectExecutor {
    async fn activate_subscription(&self, subscription_id: Uuid) -> Result<bool> {
        self.subscriptions_repo.activate(subscription_id).await
    }

    async fn set_invoice_status(&self, invoice_id: Uuid, status: InvoiceStatus) -> Result<bool> {
        self.invoices_repo.set_status(invoice_id, status).await
    }

    async fn notify_payment_failed(
        &self,
        customer_id: Uuid,
        subscription_id: Option<Uuid>,
    ) -> Result<()> {
        self.notifier.send(customer_id, subscription_id).await
    }
}
