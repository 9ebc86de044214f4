use crate::domain::invoice::InvoiceStatus;
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct InvoicesRepo {
    pub pool: PgPool,
}

impl InvoicesRepo {
    /// Compare-and-set: returns whether the row actually changed, so a
    /// redelivered event reads as a no-op.
    pub async fn set_status(&self, invoice_id: Uuid, status: InvoiceStatus) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE invoices SET status = $2, last_modified_date = now() WHERE id = $1 AND status <> $2",
        )
        .bind(invoice_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
