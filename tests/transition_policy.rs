use payments_recon::domain::invoice::{InvoiceRef, InvoiceStatus};
use payments_recon::engine::transitions::plan_effects;
use payments_recon::engine::Effect;
use uuid::Uuid;

fn invoice(status: InvoiceStatus) -> InvoiceRef {
    InvoiceRef {
        invoice_id: Uuid::new_v4(),
        status,
    }
}

#[test]
fn completed_paid_activates_and_marks_invoices_paid() {
    let customer_id = Uuid::new_v4();
    let subscription_id = Uuid::new_v4();
    let invoices = vec![invoice(InvoiceStatus::Outstanding), invoice(InvoiceStatus::Outstanding)];

    let effects = plan_effects("PAID", "COMPLETED", customer_id, Some(subscription_id), &invoices);

    assert_eq!(effects.len(), 3);
    assert_eq!(effects[0], Effect::ActivateSubscription { subscription_id });
    assert!(effects[1..].iter().all(|e| matches!(
        e,
        Effect::SetInvoiceStatus { status: InvoiceStatus::Paid, .. }
    )));
}

#[test]
fn completed_captured_is_treated_like_paid() {
    let invoices = vec![invoice(InvoiceStatus::Outstanding)];
    let effects = plan_effects("CAPTURED", "COMPLETED", Uuid::new_v4(), None, &invoices);

    assert_eq!(effects.len(), 1);
    assert!(matches!(
        effects[0],
        Effect::SetInvoiceStatus { status: InvoiceStatus::Paid, .. }
    ));
}

#[test]
fn paid_status_outside_completed_category_has_no_effects() {
    let invoices = vec![invoice(InvoiceStatus::Outstanding)];
    let effects = plan_effects("PAID", "PENDING_MERCHANT", Uuid::new_v4(), None, &invoices);
    assert!(effects.is_empty());
}

#[test]
fn capture_requested_sets_awaiting_confirmation_on_all_invoices() {
    let subscription_id = Uuid::new_v4();
    let invoices = vec![invoice(InvoiceStatus::Outstanding), invoice(InvoiceStatus::Outstanding)];

    let effects = plan_effects(
        "CAPTURE_REQUESTED",
        "PENDING_MERCHANT",
        Uuid::new_v4(),
        Some(subscription_id),
        &invoices,
    );

    assert_eq!(effects.len(), 3);
    assert_eq!(effects[0], Effect::ActivateSubscription { subscription_id });
    assert!(effects[1..].iter().all(|e| matches!(
        e,
        Effect::SetInvoiceStatus { status: InvoiceStatus::AwaitingPaymentConfirmation, .. }
    )));
    assert!(!effects.iter().any(|e| matches!(e, Effect::NotifyPaymentFailed { .. })));
}

#[test]
fn rejected_flips_invoices_and_notifies_once() {
    let customer_id = Uuid::new_v4();
    let invoices = vec![invoice(InvoiceStatus::Outstanding), invoice(InvoiceStatus::Outstanding)];

    let effects = plan_effects("REJECTED", "UNSUCCESSFUL", customer_id, None, &invoices);

    let set_failed = effects
        .iter()
        .filter(|e| matches!(e, Effect::SetInvoiceStatus { status: InvoiceStatus::PaymentFailed, .. }))
        .count();
    let notifications = effects
        .iter()
        .filter(|e| matches!(e, Effect::NotifyPaymentFailed { .. }))
        .count();

    assert_eq!(set_failed, 2);
    assert_eq!(notifications, 1);
    // Notification comes after the invoice flips.
    assert!(matches!(effects.last(), Some(Effect::NotifyPaymentFailed { .. })));
}

#[test]
fn rejected_redelivery_with_all_invoices_failed_plans_nothing() {
    let invoices = vec![invoice(InvoiceStatus::PaymentFailed), invoice(InvoiceStatus::PaymentFailed)];
    let effects = plan_effects("REJECTED", "UNSUCCESSFUL", Uuid::new_v4(), None, &invoices);
    assert!(effects.is_empty());
}

#[test]
fn rejected_does_not_downgrade_paid_invoice() {
    let invoices = vec![invoice(InvoiceStatus::Paid)];
    let effects = plan_effects("REJECTED", "PENDING", Uuid::new_v4(), None, &invoices);
    assert!(effects.is_empty());
}

#[test]
fn cancelled_and_rejected_capture_follow_the_failure_path() {
    for status in ["CANCELLED", "REJECTED_CAPTURE"] {
        let invoices = vec![invoice(InvoiceStatus::Outstanding)];
        let effects = plan_effects(status, "UNSUCCESSFUL", Uuid::new_v4(), None, &invoices);
        assert_eq!(effects.len(), 2, "status {status}");
    }
}

#[test]
fn completed_paid_replay_skips_already_paid_invoices() {
    let subscription_id = Uuid::new_v4();
    let invoices = vec![invoice(InvoiceStatus::Paid), invoice(InvoiceStatus::Paid)];

    let effects = plan_effects("PAID", "COMPLETED", Uuid::new_v4(), Some(subscription_id), &invoices);

    assert_eq!(effects, vec![Effect::ActivateSubscription { subscription_id }]);
}

#[test]
fn intermediate_status_plans_nothing() {
    let invoices = vec![invoice(InvoiceStatus::Outstanding)];
    for status in ["PENDING_APPROVAL", "REDIRECTED", "AUTHORIZATION_REQUESTED"] {
        let effects = plan_effects(status, "PENDING_PAYMENT", Uuid::new_v4(), None, &invoices);
        assert!(effects.is_empty(), "status {status}");
    }
}

#[test]
fn status_matching_is_case_insensitive() {
    let invoices = vec![invoice(InvoiceStatus::Outstanding)];
    let effects = plan_effects("paid", "completed", Uuid::new_v4(), None, &invoices);
    assert_eq!(effects.len(), 1);
}

#[test]
fn no_subscription_means_no_activation() {
    let invoices = vec![invoice(InvoiceStatus::Outstanding)];
    let effects = plan_effects("PAID", "COMPLETED", Uuid::new_v4(), None, &invoices);
    assert!(!effects.iter().any(|e| matches!(e, Effect::ActivateSubscription { .. })));
}
