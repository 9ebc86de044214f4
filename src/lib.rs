pub mod config;
pub mod domain {
    pub mod event;
    pub mod invoice;
    pub mod payment;
}
pub mod engine;
pub mod http {
    pub mod handlers {
        pub mod checkouts;
        pub mod events;
        pub mod ops;
    }
}
pub mod repo {
    pub mod invoices_repo;
    pub mod payment_store;
    pub mod subscriptions_repo;
}
pub mod service {
    pub mod checkout_service;
    pub mod effect_executor;
    pub mod notifier;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<engine::reconciler::ReconciliationEngine>,
    pub checkout_service: service::checkout_service::CheckoutService,
    pub pool: sqlx::PgPool,
}
