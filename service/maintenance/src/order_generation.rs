use architecture::MutableRepository;
use chrono::{DateTime, Datelike, Utc};
use domain_fleet::model::entity::ReservationOwner;
use domain_maintenance::{
    exception::MaintenanceResult,
    model::entity::{HistoryAction, HistoryEntry, HistoryOwner, Order, Programming},
    repository::MaintenanceTransaction,
};
use uuid::Uuid;

use crate::reservation;

pub(crate) struct GeneratedOrder {
    pub order: Order,
    /// False when the programming already had an order.
    pub created: bool,
}

/// Generates the order of an approved programming inside `tx`.
///
/// Looks the order up first so a programming never gets two. A new order
/// copies the planning, carries the default checklist, inherits the
/// programming history with a provenance prefix, and takes over the vehicle
/// reservation (or gets a fresh one when a vehicle is needed).
///
/// `programming` is updated in memory only; persisting it is up to the
/// caller.
pub(crate) async fn generate_order(
    tx: &dyn MaintenanceTransaction,
    programming: &mut Programming,
    actor: Option<Uuid>,
    now: DateTime<Utc>,
) -> MaintenanceResult<GeneratedOrder> {
    if let Some(order) = tx.orders().get_by_programming_id(programming.id).await? {
        programming.order_id = Some(order.id);
        return Ok(GeneratedOrder {
            order,
            created: false,
        });
    }

    let sequence = tx.orders().next_number_sequence(now.year()).await?;
    let mut order =
        Order::from_programming(programming, Order::format_number(now.year(), sequence), actor, now);
    let owner = ReservationOwner::Order(order.id);

    order.reservation_id =
        reservation::transfer(tx.reservations(), programming.reservation_id, owner, now).await?;
    if order.reservation_id.is_some() {
        programming.reservation_id = None;
    } else if let Some(request) = order.planning.wanted_vehicle() {
        order.reservation_id =
            Some(reservation::open(tx.reservations(), owner, request, now).await?);
    }
    tx.orders().insert(&order).await?;

    let order_owner = HistoryOwner::Order(order.id);
    let mut history: Vec<HistoryEntry> = tx
        .histories()
        .list_by_owner(HistoryOwner::Programming(programming.id))
        .await?
        .iter()
        .map(|entry| entry.copied_to(order_owner, &programming.code))
        .collect();
    history.push(
        HistoryEntry::new(order_owner, HistoryAction::CriacaoAuto, actor, now)
            .with_note(Some(format!("Gerada a partir de {}", programming.code)))
            .with_next_status(order.status),
    );
    tx.histories().append_list(&history).await?;

    programming.order_id = Some(order.id);
    tracing::info!(
        "Generated order {} from programming {}",
        order.number,
        programming.code
    );
    Ok(GeneratedOrder {
        order,
        created: true,
    })
}
