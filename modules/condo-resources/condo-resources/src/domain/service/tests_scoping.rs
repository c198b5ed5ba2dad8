#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use condo_resources_sdk::{ResourceKind, Status, TransitionRequest};
use condo_security::Role;
use uuid::Uuid;

use crate::test_support::{
    ctx_admin, ctx_as, memory_harness, new_incident, new_payment, new_reservation, seed_unit,
};

use super::DashboardService;

#[tokio::test]
async fn residents_only_see_payments_of_their_units() {
    let h = memory_harness();
    let admin = ctx_admin();
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
    let alice_units = [
        seed_unit(h.store.as_ref(), Some(alice)).await,
        seed_unit(h.store.as_ref(), Some(alice)).await,
    ];
    let bob_unit = seed_unit(h.store.as_ref(), Some(bob)).await;
    let vacant = seed_unit(h.store.as_ref(), None).await;

    let mut alice_payments = Vec::new();
    for unit in &alice_units {
        let p = h
            .controller
            .create(&admin, ResourceKind::Payment, new_payment(unit.id))
            .await
            .unwrap();
        alice_payments.push(p.id);
    }
    let bob_payment = h
        .controller
        .create(&admin, ResourceKind::Payment, new_payment(bob_unit.id))
        .await
        .unwrap();
    let vacant_payment = h
        .controller
        .create(&admin, ResourceKind::Payment, new_payment(vacant.id))
        .await
        .unwrap();

    let seen: Vec<Uuid> = h
        .controller
        .list(&ctx_as(alice, Role::Resident), ResourceKind::Payment)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(seen.len(), 2);
    assert!(alice_payments.iter().all(|id| seen.contains(id)));
    assert!(!seen.contains(&bob_payment.id));
    assert!(!seen.contains(&vacant_payment.id));

    let bob_sees = h
        .controller
        .list(&ctx_as(bob, Role::Resident), ResourceKind::Payment)
        .await
        .unwrap();
    assert_eq!(bob_sees.len(), 1);
    assert_eq!(bob_sees[0].id, bob_payment.id);

    let all = h.controller.list(&admin, ResourceKind::Payment).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn list_is_newest_first() {
    let h = memory_harness();
    let me = ctx_as(Uuid::new_v4(), Role::Resident);
    let mut ids = Vec::new();
    for _ in 0..3 {
        let r = h
            .controller
            .create(&me, ResourceKind::Reservation, new_reservation())
            .await
            .unwrap();
        ids.push(r.id);
    }
    ids.reverse();

    let listed: Vec<Uuid> = h
        .controller
        .list(&me, ResourceKind::Reservation)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn provider_sees_no_payments_or_reservations() {
    let h = memory_harness();
    let unit = seed_unit(h.store.as_ref(), Some(Uuid::new_v4())).await;
    h.controller
        .create(&ctx_admin(), ResourceKind::Payment, new_payment(unit.id))
        .await
        .unwrap();
    h.controller
        .create(
            &ctx_as(Uuid::new_v4(), Role::Resident),
            ResourceKind::Reservation,
            new_reservation(),
        )
        .await
        .unwrap();

    let provider = ctx_as(Uuid::new_v4(), Role::Provider);
    for kind in [ResourceKind::Payment, ResourceKind::Reservation] {
        assert!(h.controller.list(&provider, kind).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn residents_only_see_their_own_reservations_and_incidents() {
    let h = memory_harness();
    let (alice, bob) = (
        ctx_as(Uuid::new_v4(), Role::Resident),
        ctx_as(Uuid::new_v4(), Role::Resident),
    );

    for ctx in [&alice, &bob] {
        h.controller
            .create(ctx, ResourceKind::Reservation, new_reservation())
            .await
            .unwrap();
        h.controller
            .create(ctx, ResourceKind::Incident, new_incident(None))
            .await
            .unwrap();
    }

    for kind in [ResourceKind::Reservation, ResourceKind::Incident] {
        let rows = h.controller.list(&alice, kind).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].owner_id(), Some(alice.subject_id()));
        assert_eq!(h.controller.list(&ctx_admin(), kind).await.unwrap().len(), 2);
    }
}

#[tokio::test]
async fn dashboard_counts_follow_scope() {
    let h = memory_harness();
    let admin = ctx_admin();
    let resident = Uuid::new_v4();
    let provider = Uuid::new_v4();
    let me = ctx_as(resident, Role::Resident);
    let mine = seed_unit(h.store.as_ref(), Some(resident)).await;
    let other = seed_unit(h.store.as_ref(), Some(Uuid::new_v4())).await;

    let my_payment = h
        .controller
        .create(&admin, ResourceKind::Payment, new_payment(mine.id))
        .await
        .unwrap();
    h.controller
        .create(&admin, ResourceKind::Payment, new_payment(mine.id))
        .await
        .unwrap();
    h.controller
        .create(&admin, ResourceKind::Payment, new_payment(other.id))
        .await
        .unwrap();
    h.controller
        .transition(
            &admin,
            ResourceKind::Payment,
            my_payment.id,
            TransitionRequest::to(Status::Pagado),
        )
        .await
        .unwrap();

    let reservation = h
        .controller
        .create(&me, ResourceKind::Reservation, new_reservation())
        .await
        .unwrap();
    h.controller
        .transition(
            &admin,
            ResourceKind::Reservation,
            reservation.id,
            TransitionRequest::to(Status::Aprobado),
        )
        .await
        .unwrap();

    let assigned = h
        .controller
        .create(&me, ResourceKind::Incident, new_incident(None))
        .await
        .unwrap();
    h.controller
        .create(&me, ResourceKind::Incident, new_incident(None))
        .await
        .unwrap();
    h.controller
        .transition(
            &admin,
            ResourceKind::Incident,
            assigned.id,
            TransitionRequest::to(Status::EnProgreso).assign_provider(provider),
        )
        .await
        .unwrap();

    let dashboard = DashboardService::new(Arc::new(h.controller));

    let admin_stats = dashboard.stats(&admin).await.unwrap();
    assert_eq!(admin_stats.total_units, Some(2));
    assert_eq!(admin_stats.pending_payments, 2);
    assert_eq!(admin_stats.active_reservations, 1);
    assert_eq!(admin_stats.open_incidents, 2);

    let my_stats = dashboard.stats(&me).await.unwrap();
    assert_eq!(my_stats.total_units, None);
    assert_eq!(my_stats.pending_payments, 1);
    assert_eq!(my_stats.active_reservations, 1);
    assert_eq!(my_stats.open_incidents, 2);

    let provider_stats = dashboard
        .stats(&ctx_as(provider, Role::Provider))
        .await
        .unwrap();
    assert_eq!(provider_stats.total_units, None);
    assert_eq!(provider_stats.pending_payments, 0);
    assert_eq!(provider_stats.active_reservations, 0);
    assert_eq!(provider_stats.open_incidents, 1);
}
