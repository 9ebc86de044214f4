use axum::routing::{get, post};
use axum::Router;
use payments_recon::config::AppConfig;
use payments_recon::engine::reconciler::ReconciliationEngine;
use payments_recon::repo::invoices_repo::InvoicesRepo;
use payments_recon::repo::payment_store::PgPaymentStore;
use payments_recon::repo::subscriptions_repo::SubscriptionsRepo;
use payments_recon::service::checkout_service::CheckoutService;
use payments_recon::service::effect_executor::EffectExecutor;
use payments_recon::service::notifier::PaymentFailedNotifier;
use payments_recon::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PgPaymentStore { pool: pool.clone() });
    let invoices_repo = InvoicesRepo { pool: pool.clone() };
    let subscriptions_repo = SubscriptionsRepo { pool: pool.clone() };
    let notifier = PaymentFailedNotifier {
        client: reqwest::Client::new(),
        target_url: cfg.payment_failed_webhook_url.clone(),
    };
    let executor = EffectExecutor {
        subscriptions_repo,
        invoices_repo,
        notifier,
    };

    let engine = Arc::new(ReconciliationEngine::new(
        store.clone(),
        Arc::new(executor),
        cfg.billing_period_months,
    ));
    let checkout_service = CheckoutService {
        store,
        default_currency: cfg.default_currency.clone(),
    };

    let state = AppState {
        engine,
        checkout_service,
        pool,
    };

    let app = Router::new()
        .route("/health", get(payments_recon::http::handlers::ops::health))
        .route("/ops/readiness", get(payments_recon::http::handlers::ops::readiness))
        .route("/ops/liveness", get(payments_recon::http::handlers::ops::liveness))
        .route("/payments", post(payments_recon::http::handlers::checkouts::create_checkout))
        .route("/payment-events", post(payments_recon::http::handlers::events::ingest_event))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
