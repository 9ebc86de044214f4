use crate::domain::payment::CustomerPayment;
use crate::engine::PaymentStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    pub customer_id: Uuid,
    pub subscription_id: Option<Uuid>,
    pub currency: Option<String>,
    pub sub_total: Decimal,
    pub tax_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckoutResponse {
    pub payment_id: Uuid,
    pub merchant_reference: String,
    pub total: Decimal,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

/// Outbound checkout-creation path: the only writer that creates
/// `CustomerPayment` records. Inbound events only ever update them.
#[derive(Clone)]
pub struct CheckoutService {
    pub store: Arc<dyn PaymentStore>,
    pub default_currency: String,
}

impl CheckoutService {
    pub async fn create(
        &self,
        req: CreateCheckoutRequest,
    ) -> Result<CreateCheckoutResponse, (axum::http::StatusCode, ErrorEnvelope)> {
        if req.sub_total < Decimal::ZERO || req.tax_total < Decimal::ZERO {
            return Err((
                axum::http::StatusCode::BAD_REQUEST,
                err("INVALID_AMOUNT", "sub_total and tax_total must be non-negative"),
            ));
        }

        let customer = self
            .store
            .find_customer(req.customer_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    err("UNKNOWN_CUSTOMER", "no customer with that id"),
                )
            })?;

        let currency = req
            .currency
            .unwrap_or_else(|| self.default_currency.clone());

        let payment = CustomerPayment::new(
            customer.id,
            req.subscription_id,
            currency,
            req.sub_total,
            req.tax_total,
        );

        self.store.save_payment(&payment).await.map_err(internal)?;

        tracing::info!(
            payment_id = %payment.id,
            merchant_reference = %payment.merchant_reference,
            "checkout payment record created"
        );

        Ok(CreateCheckoutResponse {
            payment_id: payment.id,
            merchant_reference: payment.merchant_reference,
            total: payment.total,
            status: payment.status,
        })
    }
}

fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
        },
    }
}

fn internal(e: anyhow::Error) -> (axum::http::StatusCode, ErrorEnvelope) {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        err("INTERNAL_ERROR", &e.to_string()),
    )
}
