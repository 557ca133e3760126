use architecture::{MutableRepository, ReadOnlyRepository};
use chrono::Utc;
use domain_maintenance::model::{
    entity::{
        planning::{MaintenanceKind, Planning, PlanningLinks, Priority, ProgrammingOrigin},
        HistoryAction, HistoryEntry, HistoryOwner, Order, Programming, ResourcePlan,
    },
    vo::ProgrammingFilter,
};

use uuid::Uuid;

use super::*;

fn programming(code: &str) -> Programming {
    let planning = Planning {
        description: "Inspeção termográfica".to_string(),
        location: None,
        asset: None,
        condition: None,
        kind: MaintenanceKind::Inspection,
        priority: Priority::Medium,
        origin: ProgrammingOrigin::Manual,
        links: PlanningLinks::default(),
        planned_duration_hours: None,
        estimated_minutes: None,
        scheduled_at: None,
        responsible: None,
        needs_vehicle: false,
        vehicle_request: None,
        budget_estimate: 0.0,
        resources: ResourcePlan::default(),
        task_links: vec![],
    };
    Programming::new(code.to_string(), planning, false, None, Utc::now())
}

#[tokio::test]
async fn dropped_transaction_rolls_back() {
    let store = OrmStore::in_memory().await.unwrap();
    let p = programming("PRG-2026-0001");

    let tx = store.begin().await.unwrap();
    tx.programmings().insert(&p).await.unwrap();
    assert!(tx.programmings().get_by_id(p.id).await.unwrap().is_some());
    drop(tx);

    let tx = store.begin().await.unwrap();
    assert!(tx.programmings().get_by_id(p.id).await.unwrap().is_none());
}

#[tokio::test]
async fn committed_writes_are_visible_to_next_transaction() {
    let store = OrmStore::in_memory().await.unwrap();
    let p = programming("PRG-2026-0001");

    let tx = store.begin().await.unwrap();
    tx.programmings().insert(&p).await.unwrap();
    tx.histories()
        .append(&HistoryEntry::new(
            HistoryOwner::Programming(p.id),
            HistoryAction::Criacao,
            None,
            Utc::now(),
        ))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let tx = store.begin().await.unwrap();
    assert_eq!(tx.programmings().get_by_id(p.id).await.unwrap(), Some(p.clone()));
    let history = tx.histories().list_by_owner(HistoryOwner::Programming(p.id)).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn sequences_are_per_year_and_roll_back_with_the_transaction() {
    let store = OrmStore::in_memory().await.unwrap();

    let tx = store.begin().await.unwrap();
    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 1);
    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 2);
    assert_eq!(tx.programmings().next_code_sequence(2027).await.unwrap(), 1);
    assert_eq!(tx.orders().next_number_sequence(2026).await.unwrap(), 1);
    tx.commit().await.unwrap();

    let tx = store.begin().await.unwrap();
    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 3);
    drop(tx);

    let tx = store.begin().await.unwrap();
    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 3);
}

#[tokio::test]
async fn codes_are_unique() {
    let store = OrmStore::in_memory().await.unwrap();
    let tx = store.begin().await.unwrap();
    tx.programmings().insert(&programming("PRG-2026-0001")).await.unwrap();
    assert!(tx.programmings().insert(&programming("PRG-2026-0001")).await.is_err());
}

#[tokio::test]
async fn a_programming_gets_at_most_one_order() {
    let store = OrmStore::in_memory().await.unwrap();
    let p = programming("PRG-2026-0001");
    let now = Utc::now();
    let tx = store.begin().await.unwrap();
    let first = Order::from_programming(&p, Order::format_number(2026, 1), None, now);
    let second = Order::from_programming(&p, Order::format_number(2026, 2), None, now);
    tx.orders().insert(&first).await.unwrap();
    assert!(tx.orders().insert(&second).await.is_err());
    assert_eq!(
        tx.orders().get_by_programming_id(p.id).await.unwrap().map(|o| o.id),
        Some(first.id)
    );
}

#[tokio::test]
async fn query_hides_deleted_programmings() {
    let store = OrmStore::in_memory().await.unwrap();
    let kept = programming("PRG-2026-0001");
    let mut deleted = programming("PRG-2026-0002");
    deleted.soft_delete(None, Utc::now()).unwrap();

    let tx = store.begin().await.unwrap();
    tx.programmings().insert(&kept).await.unwrap();
    tx.programmings().insert(&deleted).await.unwrap();
    let page = tx.programmings().query(&ProgrammingFilter::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, kept.id);
}

#[tokio::test]
async fn transactions_are_serialised() {
    let store = OrmStore::in_memory().await.unwrap();
    let tx = store.begin().await.unwrap();

    let other = store.clone();
    let waiting = tokio::spawn(async move {
        let tx = other.begin().await.unwrap();
        tx.programmings().next_code_sequence(2026).await.unwrap()
    });
    tokio::task::yield_now().await;
    assert!(!waiting.is_finished());

    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 1);
    tx.commit().await.unwrap();
    assert_eq!(waiting.await.unwrap(), 2);
}

#[tokio::test]
async fn committed_data_survives_a_reconnect() {
    let path = std::env::temp_dir().join(format!("maintenance-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let p = programming("PRG-2026-0001");

    let store = OrmStore::connect(&url).await.unwrap();
    let tx = store.begin().await.unwrap();
    tx.programmings().insert(&p).await.unwrap();
    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 1);
    tx.commit().await.unwrap();
    drop(store);

    let store = OrmStore::connect(&url).await.unwrap();
    let tx = store.begin().await.unwrap();
    assert_eq!(tx.programmings().get_by_id(p.id).await.unwrap(), Some(p));
    assert_eq!(tx.programmings().next_code_sequence(2026).await.unwrap(), 2);
    drop(tx);
    drop(store);
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn order_number_is_fixed_once_stored() {
    let store = OrmStore::in_memory().await.unwrap();
    let p = programming("PRG-2026-0001");
    let order = Order::from_programming(&p, Order::format_number(2026, 1), None, Utc::now());

    let tx = store.begin().await.unwrap();
    tx.orders().insert(&order).await.unwrap();
    let renumbered = Order {
        number: Order::format_number(2026, 9),
        ..order.clone()
    };
    assert!(tx.orders().update(&renumbered).await.is_err());
    assert_eq!(tx.orders().get_by_id(order.id).await.unwrap(), Some(order));
}

#[tokio::test]
async fn history_keeps_insertion_order_per_owner() {
    let store = OrmStore::in_memory().await.unwrap();
    let p = programming("PRG-2026-0001");
    let other = programming("PRG-2026-0002");
    let now = Utc::now();

    let tx = store.begin().await.unwrap();
    tx.histories()
        .append_list(&[
            HistoryEntry::new(HistoryOwner::Programming(p.id), HistoryAction::Criacao, None, now),
            HistoryEntry::new(HistoryOwner::Programming(other.id), HistoryAction::Criacao, None, now),
            HistoryEntry::new(HistoryOwner::Programming(p.id), HistoryAction::Analise, None, now),
        ])
        .await
        .unwrap();
    let actions: Vec<_> = tx
        .histories()
        .list_by_owner(HistoryOwner::Programming(p.id))
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.action)
        .collect();
    assert_eq!(actions, vec![HistoryAction::Criacao, HistoryAction::Analise]);
}
