use crate::domain::invoice::{InvoiceRef, InvoiceStatus};
use crate::engine::Effect;
use uuid::Uuid;

/// Maps a persisted (status, status_category) pair to the ordered effects it
/// demands. Pure: reads only the arguments, which reflect fully-committed
/// state, so redelivered events plan the same set and already-applied work
/// plans out as nothing.
///
/// `Paid` invoices are terminal here. Neither a failure status nor a stale
/// `CAPTURE_REQUESTED` redelivery moves an invoice out of `Paid`.
pub fn plan_effects(
    status: &str,
    status_category: &str,
    customer_id: Uuid,
    subscription_id: Option<Uuid>,
    invoices: &[InvoiceRef],
) -> Vec<Effect> {
    let status = status.to_ascii_uppercase();
    let category = status_category.to_ascii_uppercase();

    let mut effects = Vec::new();

    if category == "COMPLETED" && matches!(status.as_str(), "CAPTURED" | "PAID") {
        if let Some(subscription_id) = subscription_id {
            effects.push(Effect::ActivateSubscription { subscription_id });
        }
        for invoice in invoices {
            if invoice.status != InvoiceStatus::Paid {
                effects.push(Effect::SetInvoiceStatus {
                    invoice_id: invoice.invoice_id,
                    status: InvoiceStatus::Paid,
                });
            }
        }
        return effects;
    }

    if status == "CAPTURE_REQUESTED" {
        if let Some(subscription_id) = subscription_id {
            effects.push(Effect::ActivateSubscription { subscription_id });
        }
        for invoice in invoices {
            if !matches!(
                invoice.status,
                InvoiceStatus::AwaitingPaymentConfirmation | InvoiceStatus::Paid
            ) {
                effects.push(Effect::SetInvoiceStatus {
                    invoice_id: invoice.invoice_id,
                    status: InvoiceStatus::AwaitingPaymentConfirmation,
                });
            }
        }
        return effects;
    }

    if matches!(status.as_str(), "CANCELLED" | "REJECTED" | "REJECTED_CAPTURE") {
        let mut flipped = 0;
        for invoice in invoices {
            if !matches!(invoice.status, InvoiceStatus::PaymentFailed | InvoiceStatus::Paid) {
                effects.push(Effect::SetInvoiceStatus {
                    invoice_id: invoice.invoice_id,
                    status: InvoiceStatus::PaymentFailed,
                });
                flipped += 1;
            }
        }
        // One notification per failure, not one per invoice, and none at all
        // when nothing actually flipped (redelivery).
        if flipped > 0 {
            effects.push(Effect::NotifyPaymentFailed {
                customer_id,
                subscription_id,
            });
        }
        return effects;
    }

    // Intermediate provider states: the status is persisted, no business
    // action is taken.
    effects
}
