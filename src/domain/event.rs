use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment-instrument identifier carried by a provider event. A card payment
/// yields a reusable token, a SEPA direct debit yields a mandate reference;
/// one event never carries both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventInstrument {
    CardToken { token: String },
    SepaMandate { mandate_reference: String },
}

/// Normalized provider notification. Produced by a provider adapter from a
/// webhook delivery or status poll; immutable once constructed. `status` and
/// `status_category` keep the provider's own vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub merchant_reference: String,
    pub provider_payment_id: String,
    pub status: String,
    pub status_category: String,
    pub payment_method: Option<String>,
    pub payment_product_id: Option<i32>,
    pub instrument: Option<EventInstrument>,
    pub amount_total: Option<Decimal>,
    pub received_at: chrono::DateTime<chrono::Utc>,
}
