use crate::domain::event::{EventInstrument, PaymentEvent};
use crate::engine::locks::ReferenceLocks;
use crate::engine::transitions::plan_effects;
use crate::engine::{
    Effect, EffectDispatcher, EffectOutcome, EffectRecord, PaymentStore, ReconcileResult,
    SkipReason,
};
use chrono::Months;
use std::sync::Arc;

pub struct ReconciliationEngine {
    pub store: Arc<dyn PaymentStore>,
    pub dispatcher: Arc<dyn EffectDispatcher>,
    pub locks: ReferenceLocks,
    pub billing_period_months: u32,
}

impl ReconciliationEngine {
    pub fn new(
        store: Arc<dyn PaymentStore>,
        dispatcher: Arc<dyn EffectDispatcher>,
        billing_period_months: u32,
    ) -> Self {
        Self {
            store,
            dispatcher,
            locks: ReferenceLocks::new(),
            billing_period_months,
        }
    }

    /// Applies one provider event to the matching payment record and fans out
    /// the resulting effects. Never returns `Err`: every internal error is
    /// classified into `ReconcileResult::Failed`.
    pub async fn reconcile(&self, event: PaymentEvent) -> ReconcileResult {
        let reference = event.merchant_reference.trim().to_string();
        if reference.is_empty() {
            // Some provider callbacks carry no usable correlation (malformed
            // or foreign payment). Not an error.
            tracing::debug!(provider_payment_id = %event.provider_payment_id, "event without merchant reference");
            return ReconcileResult::Skipped {
                reason: SkipReason::MissingReference,
            };
        }

        let _guard = self.locks.acquire(&reference).await;

        match self.apply(&reference, &event).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(merchant_reference = %reference, "reconciliation failed: {err:#}");
                ReconcileResult::Failed {
                    reason: format!("{err:#}"),
                }
            }
        }
    }

    async fn apply(&self, reference: &str, event: &PaymentEvent) -> anyhow::Result<ReconcileResult> {
        let Some(mut payment) = self.store.find_by_merchant_reference(reference).await? else {
            // Records are created only by the outbound checkout path, never
            // from an inbound event.
            tracing::debug!(merchant_reference = %reference, "no payment record for reference");
            return Ok(ReconcileResult::Skipped {
                reason: SkipReason::UnknownReference,
            });
        };

        let Some(mut customer) = self.store.find_customer(payment.customer_id).await? else {
            return Ok(ReconcileResult::Failed {
                reason: format!(
                    "payment {} is orphaned: customer {} not found",
                    payment.id, payment.customer_id
                ),
            });
        };

        let mut customer_dirty = false;

        // Instrument bootstrap: a customer billed out-of-band until now has
        // supplied payment details through this flow for the first time. Only
        // then does the billing cadence get (re)set; an existing instrument
        // must not have its schedule reset by a webhook replay.
        if !customer.has_instrument() && event.instrument.is_some() {
            let today = chrono::Utc::now().date_naive();
            customer.billing_period_months = Some(self.billing_period_months as i32);
            customer.next_billing_date = today.checked_add_months(Months::new(self.billing_period_months));
            customer_dirty = true;
            tracing::info!(
                customer_id = %customer.id,
                next_billing_date = ?customer.next_billing_date,
                "first payment instrument seen, billing cadence bootstrapped"
            );
        }

        // The two identifiers are mutually exclusive per event: a card token
        // never touches the mandate path and vice versa.
        match &event.instrument {
            Some(EventInstrument::CardToken { token }) => {
                payment.token = Some(token.clone());
                customer.token = Some(token.clone());
                customer_dirty = true;
            }
            Some(EventInstrument::SepaMandate { mandate_reference }) => {
                payment.mandate_reference = Some(mandate_reference.clone());
                customer.mandate_reference = Some(mandate_reference.clone());
                customer_dirty = true;
            }
            None => {}
        }

        if let Some(product_id) = event.payment_product_id {
            payment.payment_product_id = Some(product_id);
            if customer.payment_product_id != Some(product_id) {
                customer.payment_product_id = Some(product_id);
                customer_dirty = true;
            }
        }
        if let Some(method) = &event.payment_method {
            payment.payment_method = Some(method.clone());
        }

        if let Some(event_total) = event.amount_total {
            if event_total != payment.total {
                tracing::warn!(
                    merchant_reference = %reference,
                    event_total = %event_total,
                    recorded_total = %payment.total,
                    "provider-reported amount differs from recorded total"
                );
            }
        }

        payment.provider_payment_id = Some(event.provider_payment_id.clone());
        payment.status = event.status.clone();
        payment.status_category = event.status_category.clone();
        payment.touch(chrono::Utc::now());

        // Effects must observe durable state, so both records are persisted
        // before anything is dispatched.
        if customer_dirty {
            self.store.save_customer(&customer).await?;
        }
        self.store.save_payment(&payment).await?;

        let invoices = self.store.list_linked_invoices(payment.id).await?;
        let effects = plan_effects(
            &payment.status,
            &payment.status_category,
            payment.customer_id,
            payment.subscription_id,
            &invoices,
        );

        // No early exit past this point: the status is already persisted, so
        // every planned effect is attempted and its outcome reported, letting
        // the caller re-drive dispatch without re-deriving status.
        let mut records = Vec::with_capacity(effects.len());
        for effect in effects {
            let outcome = self.dispatch(&effect).await;
            records.push(EffectRecord { effect, outcome });
        }

        Ok(ReconcileResult::Applied { effects: records })
    }

    async fn dispatch(&self, effect: &Effect) -> EffectOutcome {
        let attempt = match effect {
            Effect::ActivateSubscription { subscription_id } => {
                self.dispatcher.activate_subscription(*subscription_id).await
            }
            Effect::SetInvoiceStatus { invoice_id, status } => {
                self.dispatcher.set_invoice_status(*invoice_id, *status).await
            }
            Effect::NotifyPaymentFailed {
                customer_id,
                subscription_id,
            } => self
                .dispatcher
                .notify_payment_failed(*customer_id, *subscription_id)
                .await
                .map(|_| true),
        };

        match attempt {
            Ok(changed) => EffectOutcome::Dispatched { changed },
            Err(err) => {
                tracing::warn!("effect left pending: {err:#}");
                EffectOutcome::Pending {
                    error: format!("{err:#}"),
                }
            }
        }
    }
}
