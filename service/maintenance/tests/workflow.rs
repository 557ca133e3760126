mod common;

use std::time::Duration as StdDuration;

use architecture::{MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc};
use domain_fleet::model::entity::{ReservationOwner, ReservationStatus, VehicleReservation};
use domain_maintenance::{
    exception::{ErrorKind, MaintenanceException},
    mock::{MockAnomalyService, MockAssetLookupService},
    model::{
        entity::{
            planning::{PlanningLinks, ProgrammingOrigin},
            HistoryAction, Order, OrderStatus, Programming, ProgrammingStatus,
        },
        vo::{
            Approval, AssetRef, AnomalyStatus, Closure, FinishOrder, MaterialConsumption,
            NewProgramming, ProgrammingPatch, Rejection, StartOrder,
        },
    },
    repository::MaintenanceStore,
    service::{AssetLookupService, OrderService, ProgrammingService},
};
use mockall::{predicate::eq, Sequence};
use uuid::Uuid;

use common::{
    known_assets, panel_cleaning, panel_cleaning_with_vehicle, permissive, pickup,
    quiet_anomalies, workflow, Workflow,
};

async fn reservation_of(wf: &Workflow, id: Uuid) -> VehicleReservation {
    let tx = wf.store.begin().await.unwrap();
    tx.reservations().get_by_id(id).await.unwrap().unwrap()
}

/// Creates, analyses and approves `input`.
async fn approved(wf: &Workflow, input: NewProgramming) -> (Programming, Order) {
    let programming = wf.programmings.create(input, None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();
    let outcome = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap();
    (outcome.programming, outcome.order)
}

fn closure() -> Closure {
    Closure {
        summary: "Módulos limpos, geração normalizada".to_string(),
        quality_rating: Some(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn programming_runs_through_to_finished_order() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    assert_eq!(programming.status, ProgrammingStatus::Pending);
    assert_eq!(programming.code, format!("PRG-{}-0001", Utc::now().year()));
    assert_eq!(programming.planning.budget_estimate, 50.0);

    wf.programmings.analyze(programming.id, None).await.unwrap();
    let outcome = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap();
    assert_eq!(outcome.programming.status, ProgrammingStatus::Approved);
    assert_eq!(outcome.programming.order_id, Some(outcome.order.id));
    let order = outcome.order;
    assert_eq!(order.status, OrderStatus::Planned);
    assert_eq!(order.number, format!("OS-{}-0001", Utc::now().year()));
    assert_eq!(order.checklist.len(), 6);
    assert_eq!(order.reservation_id, None);

    let started = wf
        .orders
        .start_from_programming(programming.id, StartOrder::default(), None)
        .await
        .unwrap();
    assert_eq!(started.id, order.id);
    assert_eq!(started.status, OrderStatus::InExecution);

    let line = started.planning.resources.materials[0].id;
    let finished = wf
        .orders
        .finish(
            order.id,
            FinishOrder {
                closure: closure(),
                materials: vec![MaterialConsumption {
                    line_id: line,
                    consumed_quantity: 5.0,
                }],
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(finished.status, OrderStatus::Finished);
    assert_eq!(finished.real_cost, Some(50.0));
    assert!(finished.elapsed_minutes.is_some());

    let actions: Vec<HistoryAction> = wf
        .orders
        .history(order.id)
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.action)
        .filter(|a| *a != HistoryAction::CriacaoAuto)
        .collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Criacao,
            HistoryAction::Analise,
            HistoryAction::Aprovacao,
            HistoryAction::InicioExecucao,
            HistoryAction::Finalizacao,
        ]
    );
}

#[tokio::test]
async fn inherited_history_is_prefixed_with_the_programming_code() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();
    let order = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap()
        .order;

    let history = wf.orders.history(order.id).await.unwrap();
    let prefix = format!("[{}] ", programming.code);
    let copied: Vec<_> =
        history.iter().filter(|h| h.action != HistoryAction::CriacaoAuto).collect();
    assert_eq!(copied.len(), 3);
    assert!(copied.iter().all(|h| h.note.as_deref().unwrap_or_default().starts_with(&prefix)));
    assert!(history.iter().any(|h| h.action == HistoryAction::CriacaoAuto
        && h.next_status.as_deref() == Some("PLANEJADA")));
}

#[tokio::test]
async fn scheduled_order_starts_and_pauses() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();
    let order = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap()
        .order;

    let not_scheduled = wf.orders.start(order.id, StartOrder::default(), None).await;
    assert_eq!(not_scheduled.unwrap_err().kind(), ErrorKind::Conflict);

    let plan = domain_maintenance::model::vo::ScheduleOrder {
        scheduled_at: Utc::now() + Duration::days(1),
        team: vec!["Ana".to_string(), "Bruno".to_string()],
        confirm_materials: vec![order.planning.resources.materials[0].id],
        ..Default::default()
    };
    let scheduled = wf.orders.schedule(order.id, plan, None).await.unwrap();
    assert_eq!(scheduled.status, OrderStatus::Programmed);
    assert!(scheduled.planning.resources.materials[0].confirmed);

    wf.orders.start(order.id, StartOrder::default(), None).await.unwrap();
    let paused = wf
        .orders
        .pause(order.id, "Chuva forte".to_string(), None)
        .await
        .unwrap();
    assert_eq!(paused.status, OrderStatus::Paused);
    assert_eq!(paused.pause_reason.as_deref(), Some("Chuva forte"));
    let resumed = wf
        .orders
        .resume(order.id, "Tempo firme".to_string(), None)
        .await
        .unwrap();
    assert_eq!(resumed.status, OrderStatus::InExecution);
}

#[tokio::test]
async fn approval_is_only_possible_under_analysis() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();

    let early = wf.programmings.approve(programming.id, Approval::default(), None).await;
    assert!(matches!(early, Err(MaintenanceException::ProgrammingTransition { .. })));
    assert_eq!(early.unwrap_err().kind(), ErrorKind::Conflict);

    wf.programmings.analyze(programming.id, None).await.unwrap();
    wf.programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap();
    let again = wf.programmings.approve(programming.id, Approval::default(), None).await;
    assert_eq!(again.unwrap_err().kind(), ErrorKind::Conflict);

    let orders = wf
        .orders
        .list(domain_maintenance::model::vo::OrderFilter {
            programming_id: Some(programming.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(orders.total, 1);
}

#[tokio::test]
async fn finishing_twice_keeps_the_first_cost() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();
    let order = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap()
        .order;
    wf.orders
        .start_from_programming(programming.id, StartOrder::default(), None)
        .await
        .unwrap();
    let line = order.planning.resources.materials[0].id;
    let finish = |consumed: f64| FinishOrder {
        closure: closure(),
        materials: vec![MaterialConsumption {
            line_id: line,
            consumed_quantity: consumed,
        }],
        ..Default::default()
    };
    wf.orders.finish(order.id, finish(5.0), None).await.unwrap();

    let second = wf.orders.finish(order.id, finish(9.0), None).await;
    assert_eq!(second.unwrap_err().kind(), ErrorKind::Conflict);
    let stored = wf.orders.get(order.id).await.unwrap();
    assert_eq!(stored.real_cost, Some(50.0));
    assert_eq!(stored.status, OrderStatus::Finished);
}

#[tokio::test]
async fn approved_or_cancelled_programmings_cannot_be_cancelled() {
    let wf = permissive().await;
    let approved = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(approved.id, None).await.unwrap();
    wf.programmings.approve(approved.id, Approval::default(), None).await.unwrap();
    let result = wf.programmings.cancel(approved.id, "Sem verba".to_string(), None).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);

    let pending = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    let cancelled = wf
        .programmings
        .cancel(pending.id, "Duplicada".to_string(), None)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ProgrammingStatus::Cancelled);
    let result = wf.programmings.cancel(pending.id, "Duplicada".to_string(), None).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn rejected_programming_records_the_reason() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();
    let rejected = wf
        .programmings
        .reject(
            programming.id,
            Rejection {
                reason: "Material superdimensionado".to_string(),
                improvement_suggestion: Some("Rever quantidade".to_string()),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, ProgrammingStatus::Rejected);
    let history = wf.programmings.history(programming.id).await.unwrap();
    let last = history.last().unwrap();
    assert_eq!(last.action, HistoryAction::Rejeicao);
    assert_eq!(last.note.as_deref(), Some("Material superdimensionado"));
}

#[tokio::test]
async fn deleted_programming_is_gone() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.delete(programming.id, None).await.unwrap();
    let result = wf.programmings.get(programming.id).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn vehicle_reservation_moves_to_the_order() {
    let wf = permissive().await;
    let input = panel_cleaning_with_vehicle();
    let programming = wf.programmings.create(input, None).await.unwrap();
    let reservation_id = programming.reservation_id.unwrap();

    wf.programmings.analyze(programming.id, None).await.unwrap();
    let outcome = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap();
    assert_eq!(outcome.order.reservation_id, Some(reservation_id));
    assert_eq!(outcome.programming.reservation_id, None);

    let tx = wf.store.begin().await.unwrap();
    let reservation = tx.reservations().get_by_id(reservation_id).await.unwrap().unwrap();
    assert_eq!(reservation.owner, ReservationOwner::Order(outcome.order.id));
    assert_eq!(reservation.status, ReservationStatus::Active);
}

#[tokio::test]
async fn unknown_reference_is_not_found() {
    let equipment = Uuid::new_v4();
    let mut lookup = MockAssetLookupService::new();
    lookup
        .expect_exists()
        .returning(move |reference| Ok(reference != AssetRef::Equipment(equipment)));
    let wf = workflow(lookup, quiet_anomalies()).await;

    let input = NewProgramming {
        links: PlanningLinks {
            equipment_id: Some(equipment),
            ..Default::default()
        },
        ..panel_cleaning()
    };
    let result = wf.programmings.create(input, None).await;
    assert!(matches!(
        result,
        Err(MaintenanceException::ReferenceNotFound {
            reference: AssetRef::Equipment(id)
        }) if id == equipment
    ));
}

#[tokio::test]
async fn failed_approval_leaves_nothing_behind() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();

    // Take the number the approval is about to use.
    let year = Utc::now().year();
    let (planning, _) = panel_cleaning().into_planning().unwrap();
    let other = Programming::new("PRG-0000-0000".to_string(), planning, false, None, Utc::now());
    let squatter = Order::from_programming(&other, Order::format_number(year, 1), None, Utc::now());
    let tx = wf.store.begin().await.unwrap();
    tx.orders().insert(&squatter).await.unwrap();
    tx.commit().await.unwrap();

    let result = wf.programmings.approve(programming.id, Approval::default(), None).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);

    let stored = wf.programmings.get(programming.id).await.unwrap();
    assert_eq!(stored.status, ProgrammingStatus::InAnalysis);
    assert_eq!(stored.order_id, None);
    let history = wf.programmings.history(programming.id).await.unwrap();
    assert!(history.iter().all(|h| h.action != HistoryAction::Aprovacao));
}

#[tokio::test]
async fn anomaly_follows_the_workflow() {
    let anomaly_id = Uuid::new_v4();
    let mut anomaly = MockAnomalyService::new();
    let mut sequence = Sequence::new();
    anomaly
        .expect_update_status()
        .with(eq(anomaly_id), eq(AnomalyStatus::InAnalysis))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    anomaly
        .expect_update_status()
        .with(eq(anomaly_id), eq(AnomalyStatus::OrderGenerated))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    anomaly
        .expect_resolve()
        .withf(move |id, note| *id == anomaly_id && note.is_some())
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    let wf = workflow(known_assets(), anomaly).await;

    let input = NewProgramming {
        origin: ProgrammingOrigin::Anomaly,
        links: PlanningLinks {
            anomaly_id: Some(anomaly_id),
            ..Default::default()
        },
        ..panel_cleaning()
    };
    let programming = wf.programmings.create(input, None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();
    let order = wf
        .programmings
        .approve(programming.id, Approval::default(), None)
        .await
        .unwrap()
        .order;
    wf.orders
        .start_from_programming(programming.id, StartOrder::default(), None)
        .await
        .unwrap();
    wf.orders
        .finish(
            order.id,
            FinishOrder {
                closure: closure(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn anomaly_failures_do_not_fail_the_workflow() {
    let mut anomaly = MockAnomalyService::new();
    anomaly
        .expect_update_status()
        .returning(|_, _| Err(anyhow::anyhow!("anomaly registry is down")));
    let wf = workflow(known_assets(), anomaly).await;

    let anomaly_id = Uuid::new_v4();
    let input = NewProgramming {
        origin: ProgrammingOrigin::Anomaly,
        links: PlanningLinks {
            anomaly_id: Some(anomaly_id),
            ..Default::default()
        },
        ..panel_cleaning()
    };
    let programming = wf.programmings.create(input, None).await.unwrap();
    assert_eq!(programming.planning.links.anomaly_id, Some(anomaly_id));
}

#[tokio::test]
async fn update_opens_and_releases_the_reservation() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    assert_eq!(programming.reservation_id, None);

    let wanting = wf
        .programmings
        .update(
            programming.id,
            ProgrammingPatch {
                needs_vehicle: Some(true),
                vehicle_request: Some(pickup()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    let reservation_id = wanting.reservation_id.unwrap();
    let reservation = reservation_of(&wf, reservation_id).await;
    assert_eq!(reservation.owner, ReservationOwner::Programming(programming.id));
    assert_eq!(reservation.status, ReservationStatus::Active);
    assert_eq!(reservation.odometer_start, Some(12_000.0));

    let without = wf
        .programmings
        .update(
            programming.id,
            ProgrammingPatch {
                needs_vehicle: Some(false),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(without.reservation_id, None);
    let reservation = reservation_of(&wf, reservation_id).await;
    assert_eq!(reservation.status, ReservationStatus::Cancelled);
    assert!(reservation.cancel_reason.is_some());
    assert_eq!(wf.programmings.get(programming.id).await.unwrap().reservation_id, None);
}

#[tokio::test]
async fn programming_under_analysis_is_not_editable() {
    let wf = permissive().await;
    let programming = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    wf.programmings.analyze(programming.id, None).await.unwrap();

    let patch = ProgrammingPatch {
        description: Some("Limpeza completa".to_string()),
        ..Default::default()
    };
    let result = wf.programmings.update(programming.id, patch, None).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);

    let stored = wf.programmings.get(programming.id).await.unwrap();
    assert_eq!(stored.planning.description, programming.planning.description);
    let history = wf.programmings.history(programming.id).await.unwrap();
    assert!(history.iter().all(|h| h.action != HistoryAction::Atualizacao));
}

/// Registry answering after two seconds.
struct SlowRegistry;

#[async_trait]
impl AssetLookupService for SlowRegistry {
    async fn exists(&self, _reference: AssetRef) -> anyhow::Result<bool> {
        tokio::time::sleep(StdDuration::from_secs(2)).await;
        Ok(true)
    }
}

#[tokio::test]
async fn reads_proceed_while_an_update_waits_on_the_registry() {
    let wf = workflow(SlowRegistry, quiet_anomalies()).await;
    let slow = wf.programmings.create(panel_cleaning(), None).await.unwrap();
    let other = wf.programmings.create(panel_cleaning(), None).await.unwrap();

    let patch = ProgrammingPatch {
        links: Some(PlanningLinks {
            equipment_id: Some(Uuid::new_v4()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let (updated, read) = tokio::join!(wf.programmings.update(slow.id, patch, None), async {
        tokio::time::sleep(StdDuration::from_millis(200)).await;
        tokio::time::timeout(StdDuration::from_secs(1), wf.programmings.get(other.id)).await
    });
    assert!(updated.unwrap().planning.links.equipment_id.is_some());
    assert_eq!(read.expect("read waited for the registry").unwrap().id, other.id);
}

#[tokio::test]
async fn draft_is_submitted_once() {
    let wf = permissive().await;
    let draft = wf
        .programmings
        .create(
            NewProgramming {
                draft: true,
                ..panel_cleaning()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(draft.status, ProgrammingStatus::Draft);

    let submitted = wf.programmings.submit(draft.id, None).await.unwrap();
    assert_eq!(submitted.status, ProgrammingStatus::Pending);
    let again = wf.programmings.submit(draft.id, None).await;
    assert_eq!(again.unwrap_err().kind(), ErrorKind::Conflict);

    let history = wf.programmings.history(draft.id).await.unwrap();
    assert_eq!(
        history.iter().filter(|h| h.action == HistoryAction::Submissao).count(),
        1
    );
}

#[tokio::test]
async fn cancelled_order_releases_vehicle_and_anomaly() {
    let anomaly_id = Uuid::new_v4();
    let mut anomaly = MockAnomalyService::new();
    let mut sequence = Sequence::new();
    for status in [
        AnomalyStatus::InAnalysis,
        AnomalyStatus::OrderGenerated,
        AnomalyStatus::Awaiting,
    ] {
        anomaly
            .expect_update_status()
            .with(eq(anomaly_id), eq(status))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(()));
    }
    let wf = workflow(known_assets(), anomaly).await;

    let input = NewProgramming {
        origin: ProgrammingOrigin::Anomaly,
        links: PlanningLinks {
            anomaly_id: Some(anomaly_id),
            ..Default::default()
        },
        ..panel_cleaning_with_vehicle()
    };
    let (_, order) = approved(&wf, input).await;
    let reservation_id = order.reservation_id.unwrap();

    let cancelled = wf
        .orders
        .cancel(order.id, "Inversor substituído em garantia".to_string(), None)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    let reservation = reservation_of(&wf, reservation_id).await;
    assert_eq!(reservation.status, ReservationStatus::Cancelled);
    assert_eq!(
        reservation.cancel_reason.as_deref(),
        Some("Inversor substituído em garantia")
    );
}

#[tokio::test]
async fn finishing_returns_the_vehicle_with_its_reading() {
    let wf = permissive().await;
    let (programming, order) = approved(&wf, panel_cleaning_with_vehicle()).await;
    let reservation_id = order.reservation_id.unwrap();
    wf.orders
        .start_from_programming(programming.id, StartOrder::default(), None)
        .await
        .unwrap();

    let backwards = wf
        .orders
        .finish(
            order.id,
            FinishOrder {
                closure: closure(),
                odometer_end: Some(11_000.0),
                ..Default::default()
            },
            None,
        )
        .await;
    assert!(matches!(backwards, Err(MaintenanceException::Fleet(_))));
    assert_eq!(backwards.unwrap_err().kind(), ErrorKind::Validation);
    assert_eq!(wf.orders.get(order.id).await.unwrap().status, OrderStatus::InExecution);
    assert_eq!(
        reservation_of(&wf, reservation_id).await.status,
        ReservationStatus::Active
    );

    let finished = wf
        .orders
        .finish(
            order.id,
            FinishOrder {
                closure: closure(),
                odometer_end: Some(12_150.0),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(finished.status, OrderStatus::Finished);
    let reservation = reservation_of(&wf, reservation_id).await;
    assert_eq!(reservation.status, ReservationStatus::Finished);
    assert_eq!(reservation.odometer_end, Some(12_150.0));
}

#[tokio::test]
async fn approved_programming_cannot_be_deleted() {
    let wf = permissive().await;
    let (programming, _) = approved(&wf, panel_cleaning()).await;

    let result = wf.programmings.delete(programming.id, None).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);
    let stored = wf.programmings.get(programming.id).await.unwrap();
    assert_eq!(stored.status, ProgrammingStatus::Approved);
}

#[tokio::test]
async fn cancelled_programming_releases_its_vehicle() {
    let wf = permissive().await;
    let programming = wf
        .programmings
        .create(panel_cleaning_with_vehicle(), None)
        .await
        .unwrap();
    let reservation_id = programming.reservation_id.unwrap();

    wf.programmings
        .cancel(programming.id, "Duplicada".to_string(), None)
        .await
        .unwrap();
    let reservation = reservation_of(&wf, reservation_id).await;
    assert_eq!(reservation.status, ReservationStatus::Cancelled);
    assert_eq!(reservation.cancel_reason.as_deref(), Some("Duplicada"));
}
