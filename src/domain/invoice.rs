use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Outstanding,
    AwaitingPaymentConfirmation,
    Paid,
    PaymentFailed,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Outstanding => "OUTSTANDING",
            InvoiceStatus::AwaitingPaymentConfirmation => "AWAITING_PAYMENT_CONFIRMATION",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::PaymentFailed => "PAYMENT_FAILED",
        }
    }

    pub fn parse(s: &str) -> InvoiceStatus {
        match s {
            "AWAITING_PAYMENT_CONFIRMATION" => InvoiceStatus::AwaitingPaymentConfirmation,
            "PAID" => InvoiceStatus::Paid,
            "PAYMENT_FAILED" => InvoiceStatus::PaymentFailed,
            _ => InvoiceStatus::Outstanding,
        }
    }
}

/// Invoice linked to a payment, as seen by the reconciliation engine:
/// identity plus current status, read-only.
#[derive(Debug, Clone)]
pub struct InvoiceRef {
    pub invoice_id: Uuid,
    pub status: InvoiceStatus,
}
