use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct SubscriptionsRepo {
    pub pool: PgPool,
}

impl SubscriptionsRepo {
    /// Idempotent: activating an already-active subscription changes nothing
    /// and reports false.
    pub async fn activate(&self, subscription_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE subscriptions SET status = 'ACTIVE', last_modified_date = now() WHERE id = $1 AND status <> 'ACTIVE'",
        )
        .bind(subscription_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
