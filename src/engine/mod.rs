use crate::domain::invoice::{InvoiceRef, InvoiceStatus};
use crate::domain::payment::{Customer, CustomerPayment};
use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

pub mod locks;
pub mod reconciler;
pub mod transitions;

/// Persistence seen by the engine. Lookups by merchant reference are
/// case-insensitive; saves are full-record upserts.
#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync {
    async fn find_by_merchant_reference(&self, reference: &str) -> Result<Option<CustomerPayment>>;

    async fn find_customer(&self, customer_id: Uuid) -> Result<Option<Customer>>;

    async fn save_payment(&self, payment: &CustomerPayment) -> Result<()>;

    async fn save_customer(&self, customer: &Customer) -> Result<()>;

    async fn list_linked_invoices(&self, payment_id: Uuid) -> Result<Vec<InvoiceRef>>;
}

/// Downstream command execution. Every call must be safe to repeat; the
/// `bool` returns report whether the call changed anything, so replays can be
/// told apart from first applications.
#[async_trait::async_trait]
pub trait EffectDispatcher: Send + Sync {
    async fn activate_subscription(&self, subscription_id: Uuid) -> Result<bool>;

    async fn set_invoice_status(&self, invoice_id: Uuid, status: InvoiceStatus) -> Result<bool>;

    async fn notify_payment_failed(
        &self,
        customer_id: Uuid,
        subscription_id: Option<Uuid>,
    ) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    ActivateSubscription {
        subscription_id: Uuid,
    },
    SetInvoiceStatus {
        invoice_id: Uuid,
        status: InvoiceStatus,
    },
    NotifyPaymentFailed {
        customer_id: Uuid,
        subscription_id: Option<Uuid>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectOutcome {
    /// The dispatcher ran the command; `changed` is false when it was a
    /// replay no-op downstream.
    Dispatched { changed: bool },
    /// Dispatch failed after the payment was already persisted. The caller
    /// re-drives by redelivering the event.
    Pending { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectRecord {
    pub effect: Effect,
    pub outcome: EffectOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    MissingReference,
    UnknownReference,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconcileResult {
    Applied { effects: Vec<EffectRecord> },
    Skipped { reason: SkipReason },
    Failed { reason: String },
}

impl ReconcileResult {
    pub fn fully_dispatched(&self) -> bool {
        match self {
            ReconcileResult::Applied { effects } => effects
                .iter()
                .all(|r| matches!(r.outcome, EffectOutcome::Dispatched { .. })),
            ReconcileResult::Skipped { .. } => true,
            ReconcileResult::Failed { .. } => false,
        }
    }
}
