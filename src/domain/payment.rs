use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One payment attempt for a customer, optionally tied to a subscription.
/// Created only by the outbound checkout path; mutated only by the
/// reconciliation engine. `merchant_reference` is generated locally and
/// echoed back by the provider in every event for this payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPayment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub subscription_id: Option<Uuid>,
    pub merchant_reference: String,
    pub provider_payment_id: Option<String>,
    pub payment_product_id: Option<i32>,
    pub payment_method: Option<String>,
    pub currency: String,
    pub status: String,
    pub status_category: String,
    pub token: Option<String>,
    pub mandate_reference: Option<String>,
    pub sub_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
    pub creation_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl CustomerPayment {
    pub fn new(
        customer_id: Uuid,
        subscription_id: Option<Uuid>,
        currency: String,
        sub_total: Decimal,
        tax_total: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            subscription_id,
            // A UUID rather than the record id: record ids can overlap across
            // provider environments, the reference must not.
            merchant_reference: Uuid::new_v4().to_string(),
            provider_payment_id: None,
            payment_product_id: None,
            payment_method: None,
            currency,
            status: "CREATED".to_string(),
            status_category: "CREATED".to_string(),
            token: None,
            mandate_reference: None,
            sub_total,
            tax_total,
            total: sub_total + tax_total,
            creation_date: now,
            last_modified_date: now,
        }
    }

    /// Keeps `last_modified_date` monotonically non-decreasing.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_modified_date {
            self.last_modified_date = now;
        }
    }
}

/// Durable customer billing profile. At most one of `token` /
/// `mandate_reference` is written per event; both stay populated with
/// whatever the most recent payment of each kind supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub locale: Option<String>,
    pub payment_product_id: Option<i32>,
    pub token: Option<String>,
    pub mandate_reference: Option<String>,
    pub billing_period_months: Option<i32>,
    pub next_billing_date: Option<NaiveDate>,
}

impl Customer {
    pub fn has_instrument(&self) -> bool {
        self.token.is_some() || self.mandate_reference.is_some()
    }
}
