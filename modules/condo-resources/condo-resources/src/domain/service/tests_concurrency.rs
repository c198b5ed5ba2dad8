#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::Ordering;

use condo_resources_sdk::{Latest, ResourceKind, Status, TransitionRequest};
use condo_security::Role;
use tokio::sync::Barrier;
use uuid::Uuid;

use crate::config::CondoResourcesConfig;
use crate::domain::error::DomainError;
use crate::domain::events::ResourceEvent;
use crate::test_support::{
    controller_over, ctx_admin, ctx_as, gated_harness, new_incident, new_payment, seed_unit,
};

#[tokio::test]
async fn concurrent_transitions_across_controllers_yield_one_conflict() {
    let h = gated_harness(&CondoResourcesConfig::default());
    let reporter = ctx_as(Uuid::new_v4(), Role::Resident);
    let incident = h
        .controller
        .create(&reporter, ResourceKind::Incident, new_incident(None))
        .await
        .unwrap();

    // Second process over the same store, with its own in-flight set.
    let (other_events, other) = controller_over(
        Arc::clone(&h.repo),
        Arc::clone(&h.store),
        &CondoResourcesConfig::default(),
    );
    // Both reads see `nuevo` before either write is attempted.
    h.repo.sync_gets(Arc::new(Barrier::new(2)));

    let admin = ctx_admin();
    let request = TransitionRequest::to(Status::EnProgreso);
    let (a, b) = tokio::join!(
        h.controller
            .transition(&admin, ResourceKind::Incident, incident.id, request.clone()),
        other.transition(&admin, ResourceKind::Incident, incident.id, request),
    );

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Conflict { .. })))
        .count();
    assert_eq!((wins, conflicts), (1, 1), "{outcomes:?}");
    assert_eq!(h.repo.update_calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.store.peek(incident.id).unwrap().status, Status::EnProgreso);

    let changes = h
        .events
        .events()
        .into_iter()
        .chain(other_events.events())
        .filter(|e| matches!(e, ResourceEvent::StatusChanged { .. }))
        .count();
    assert_eq!(changes, 1);
}

#[tokio::test]
async fn in_flight_transition_rejects_a_second_one_locally() {
    let h = gated_harness(&CondoResourcesConfig::default());
    let unit = seed_unit(h.store.as_ref(), None).await;
    let admin = ctx_admin();
    let payment = h
        .controller
        .create(&admin, ResourceKind::Payment, new_payment(unit.id))
        .await
        .unwrap();

    let gate = h.repo.gate_next_update();
    let first = h.controller.transition(
        &admin,
        ResourceKind::Payment,
        payment.id,
        TransitionRequest::to(Status::Pagado),
    );
    let second = async {
        gate.entered.notified().await;
        let result = h
            .controller
            .transition(
                &admin,
                ResourceKind::Payment,
                payment.id,
                TransitionRequest::to(Status::Vencido),
            )
            .await;
        gate.release.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap().status, Status::Pagado);
    assert!(matches!(second, Err(DomainError::Conflict { .. })));
    assert_eq!(h.repo.update_calls.load(Ordering::SeqCst), 1);

    // The claim is released afterwards.
    let again = h
        .controller
        .transition(
            &admin,
            ResourceKind::Payment,
            payment.id,
            TransitionRequest::to(Status::Vencido),
        )
        .await;
    assert!(matches!(again, Err(DomainError::InvalidTransition { .. })));
}

#[tokio::test]
async fn in_flight_transition_is_invisible_outside_scope() {
    let h = gated_harness(&CondoResourcesConfig::default());
    let unit = seed_unit(h.store.as_ref(), Some(Uuid::new_v4())).await;
    let admin = ctx_admin();
    let stranger = ctx_as(Uuid::new_v4(), Role::Resident);
    let payment = h
        .controller
        .create(&admin, ResourceKind::Payment, new_payment(unit.id))
        .await
        .unwrap();

    let gate = h.repo.gate_next_update();
    let first = h.controller.transition(
        &admin,
        ResourceKind::Payment,
        payment.id,
        TransitionRequest::to(Status::Pagado),
    );
    let stranger_attempts = async {
        gate.entered.notified().await;
        let existing = h
            .controller
            .transition(
                &stranger,
                ResourceKind::Payment,
                payment.id,
                TransitionRequest::to(Status::Pagado),
            )
            .await;
        let absent = h
            .controller
            .transition(
                &stranger,
                ResourceKind::Payment,
                Uuid::new_v4(),
                TransitionRequest::to(Status::Pagado),
            )
            .await;
        gate.release.notify_one();
        (existing, absent)
    };
    let (first, (existing, absent)) = tokio::join!(first, stranger_attempts);

    assert_eq!(first.unwrap().status, Status::Pagado);
    assert!(matches!(existing, Err(DomainError::NotFound { .. })), "{existing:?}");
    assert!(matches!(absent, Err(DomainError::NotFound { .. })), "{absent:?}");
    assert_eq!(h.repo.update_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn newer_list_supersedes_older_one() {
    let h = gated_harness(&CondoResourcesConfig::default());
    let me = ctx_as(Uuid::new_v4(), Role::Resident);
    h.controller
        .create(&me, ResourceKind::Incident, new_incident(None))
        .await
        .unwrap();

    let gate = h.repo.gate_next_list();
    let older = h.controller.list_latest(&me, ResourceKind::Incident);
    let newer = async {
        gate.entered.notified().await;
        let result = h.controller.list_latest(&me, ResourceKind::Incident).await;
        gate.release.notify_one();
        result
    };
    let (older, newer) = tokio::join!(older, newer);

    assert!(older.unwrap().is_superseded());
    assert_eq!(newer.unwrap().into_current().map(|rows| rows.len()), Some(1));
}

#[tokio::test]
async fn lists_of_other_principals_or_kinds_do_not_supersede() {
    let h = gated_harness(&CondoResourcesConfig::default());
    let me = ctx_as(Uuid::new_v4(), Role::Resident);
    let admin = ctx_admin();

    let gate = h.repo.gate_next_list();
    let mine = h.controller.list_latest(&me, ResourceKind::Incident);
    let others = async {
        gate.entered.notified().await;
        let a = h.controller.list_latest(&admin, ResourceKind::Incident).await;
        let b = h.controller.list_latest(&me, ResourceKind::Reservation).await;
        gate.release.notify_one();
        (a, b)
    };
    let (mine, (a, b)) = tokio::join!(mine, others);

    assert!(matches!(mine.unwrap(), Latest::Current(_)));
    assert!(matches!(a.unwrap(), Latest::Current(_)));
    assert!(matches!(b.unwrap(), Latest::Current(_)));
}

#[tokio::test(start_paused = true)]
async fn slow_store_surfaces_as_transient() {
    let config = CondoResourcesConfig {
        store_timeout_ms: 50,
        ..CondoResourcesConfig::default()
    };
    let h = gated_harness(&config);
    let _stuck = h.repo.gate_next_list();

    let err = h
        .controller
        .list(&ctx_admin(), ResourceKind::Incident)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Transient(_)));
}
