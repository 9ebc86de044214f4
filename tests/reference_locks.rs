use payments_recon::engine::locks::ReferenceLocks;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn same_reference_serializes_case_insensitively() {
    let locks = Arc::new(ReferenceLocks::new());
    let guard = locks.acquire("Ref-1").await;

    let mut contender = {
        let locks = locks.clone();
        tokio::spawn(async move {
            let _guard = locks.acquire("REF-1").await;
        })
    };

    // The redelivery must wait for the in-flight reconcile.
    let blocked = timeout(Duration::from_millis(50), &mut contender).await;
    assert!(blocked.is_err());

    drop(guard);
    contender.await.expect("contender task panicked");
}

#[tokio::test]
async fn distinct_references_do_not_contend() {
    let locks = ReferenceLocks::new();
    let _held = locks.acquire("ref-a").await;

    let other = timeout(Duration::from_millis(50), locks.acquire("ref-b")).await;
    assert!(other.is_ok());
}

#[tokio::test]
async fn released_reference_can_be_reacquired() {
    let locks = ReferenceLocks::new();
    drop(locks.acquire("ref-1").await);
    let _again = timeout(Duration::from_millis(50), locks.acquire("ref-1"))
        .await
        .expect("lock should be free again");
}
