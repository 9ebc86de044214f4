use crate::domain::invoice::{InvoiceRef, InvoiceStatus};
use crate::domain::payment::{Customer, CustomerPayment};
use crate::engine::PaymentStore;
use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPaymentStore {
    pub pool: PgPool,
}

fn payment_from_row(row: sqlx::postgres::PgRow) -> CustomerPayment {
    CustomerPayment {
        id: row.get("id"),
        customer_id: row.get("customer_id"),
        subscription_id: row.get("subscription_id"),
        merchant_reference: row.get("merchant_reference"),
        provider_payment_id: row.get("provider_payment_id"),
        payment_product_id: row.get("payment_product_id"),
        payment_method: row.get("payment_method"),
        currency: row.get("currency"),
        status: row.get("status"),
        status_category: row.get("status_category"),
        token: row.get("token"),
        mandate_reference: row.get("mandate_reference"),
        sub_total: row.get("sub_total"),
        tax_total: row.get("tax_total"),
        total: row.get("total"),
        creation_date: row.get("creation_date"),
        last_modified_date: row.get("last_modified_date"),
    }
}

#[async_trait::async_trait]
impl PaymentStore for PgPaymentStore {
    async fn find_by_merchant_reference(&self, reference: &str) -> Result<Option<CustomerPayment>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, subscription_id, merchant_reference, provider_payment_id,
                   payment_product_id, payment_method, currency, status, status_category,
                   token, mandate_reference, sub_total, tax_total, total,
                   creation_date, last_modified_date
            FROM customer_payments
            WHERE LOWER(merchant_reference) = LOWER($1)
            "#,
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(payment_from_row))
    }

    async fn find_customer(&self, customer_id: Uuid) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, locale, payment_product_id, token, mandate_reference,
                   billing_period_months, next_billing_date
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Customer {
            id: r.get("id"),
            email: r.get("email"),
            locale: r.get("locale"),
            payment_product_id: r.get("payment_product_id"),
            token: r.get("token"),
            mandate_reference: r.get("mandate_reference"),
            billing_period_months: r.get("billing_period_months"),
            next_billing_date: r.get("next_billing_date"),
        }))
    }

    async fn save_payment(&self, payment: &CustomerPayment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customer_payments (
                id, customer_id, subscription_id, merchant_reference, provider_payment_id,
                payment_product_id, payment_method, currency, status, status_category,
                token, mandate_reference, sub_total, tax_total, total,
                creation_date, last_modified_date
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15,
                $16, $17
            )
            ON CONFLICT (id) DO UPDATE SET
                provider_payment_id = EXCLUDED.provider_payment_id,
                payment_product_id = EXCLUDED.payment_product_id,
                payment_method = EXCLUDED.payment_method,
                status = EXCLUDED.status,
                status_category = EXCLUDED.status_category,
                token = EXCLUDED.token,
                mandate_reference = EXCLUDED.mandate_reference,
                last_modified_date = EXCLUDED.last_modified_date
            "#,
        )
        .bind(payment.id)
        .bind(payment.customer_id)
        .bind(payment.subscription_id)
        .bind(&payment.merchant_reference)
        .bind(&payment.provider_payment_id)
        .bind(payment.payment_product_id)
        .bind(&payment.payment_method)
        .bind(&payment.currency)
        .bind(&payment.status)
        .bind(&payment.status_category)
        .bind(&payment.token)
        .bind(&payment.mandate_reference)
        .bind(payment.sub_total)
        .bind(payment.tax_total)
        .bind(payment.total)
        .bind(payment.creation_date)
        .bind(payment.last_modified_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET payment_product_id = $2,
                token = $3,
                mandate_reference = $4,
                billing_period_months = $5,
                next_billing_date = $6
            WHERE id = $1
            "#,
        )
        .bind(customer.id)
        .bind(customer.payment_product_id)
        .bind(&customer.token)
        .bind(&customer.mandate_reference)
        .bind(customer.billing_period_months)
        .bind(customer.next_billing_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_linked_invoices(&self, payment_id: Uuid) -> Result<Vec<InvoiceRef>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.status
            FROM invoices i
            JOIN invoice_payments ip ON ip.invoice_id = i.id
            WHERE ip.customer_payment_id = $1
            ORDER BY i.id
            "#,
        )
        .bind(payment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| InvoiceRef {
                invoice_id: row.get("id"),
                status: InvoiceStatus::parse(row.get("status")),
            })
            .collect())
    }
}
