use std::sync::Arc;

use architecture::{MutableRepository, PaginationResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_fleet::model::entity::ReservationOwner;
use domain_maintenance::{
    exception::{MaintenanceException, MaintenanceResult},
    model::{
        entity::{
            resource::TaskLinkStatus, HistoryAction, HistoryEntry, HistoryOwner, Order,
            ProgrammingStatus, StatusChange,
        },
        vo::{
            AnomalyStatus, ChecklistUpdate, FinishOrder, MaterialUpdate, OrderFilter,
            ScheduleOrder, StartOrder, ToolUpdate,
        },
    },
    repository::{MaintenanceStore, MaintenanceTransaction},
    service::OrderService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{
    anomaly_sync::AnomalySynchronizer,
    order_generation::generate_order,
    reservation,
    unit_of_work::{load_order, load_programming, within, WorkflowSettings},
};

#[derive(TypedBuilder)]
pub struct OrderServiceImpl {
    store: Arc<dyn MaintenanceStore>,
    anomaly_sync: AnomalySynchronizer,
    #[builder(default)]
    settings: WorkflowSettings,
}

/// Persists the order and its history entry, then commits.
async fn save(
    tx: Box<dyn MaintenanceTransaction>,
    order: &Order,
    action: HistoryAction,
    change: StatusChange,
    note: Option<String>,
    actor: Option<Uuid>,
    now: DateTime<Utc>,
) -> MaintenanceResult<()> {
    tx.orders().update(order).await?;
    tx.histories()
        .append(
            &HistoryEntry::new(HistoryOwner::Order(order.id), action, actor, now)
                .with_note(note)
                .with_change(change),
        )
        .await?;
    tx.commit().await?;
    Ok(())
}

impl OrderServiceImpl {
    /// Loads the order, applies `step` and records it under `action`.
    async fn apply<F>(
        &self,
        id: Uuid,
        action: HistoryAction,
        note: Option<String>,
        actor: Option<Uuid>,
        step: F,
    ) -> MaintenanceResult<Order>
    where
        F: FnOnce(&mut Order, DateTime<Utc>) -> MaintenanceResult<StatusChange> + Send,
    {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut order = load_order(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = step(&mut order, now)?;
            save(tx, &order, action, change, note, actor, now).await?;
            tracing::info!("Order {}: {action:?}", order.number);
            Ok(order)
        })
        .await
    }

    async fn resolve_task(
        &self,
        id: Uuid,
        task_id: Uuid,
        outcome: TaskLinkStatus,
        note: Option<String>,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        let action = match outcome {
            TaskLinkStatus::Cancelled => HistoryAction::TarefaCancelada,
            _ => HistoryAction::TarefaConcluida,
        };
        let history_note = note.clone();
        self.apply(id, action, history_note, actor, move |order, now| {
            order.resolve_task(task_id, outcome, note, actor, now)
        })
        .await
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    async fn list(&self, filter: OrderFilter) -> MaintenanceResult<PaginationResult<Order>> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            Ok(tx.orders().query(&filter).await?)
        })
        .await
    }

    async fn get(&self, id: Uuid) -> MaintenanceResult<Order> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            load_order(tx.as_ref(), id).await
        })
        .await
    }

    async fn schedule(
        &self,
        id: Uuid,
        plan: ScheduleOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut order = load_order(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = order.schedule(&plan, actor, now)?;
            if let Some(request) = &plan.vehicle_request {
                order.reservation_id = reservation::reconcile(
                    tx.reservations(),
                    ReservationOwner::Order(order.id),
                    order.reservation_id,
                    Some(request),
                    now,
                )
                .await?;
            }
            save(tx, &order, HistoryAction::Programacao, change, None, actor, now).await?;
            tracing::info!("Scheduled order {} at {}", order.number, plan.scheduled_at);
            Ok(order)
        })
        .await
    }

    async fn start(
        &self,
        id: Uuid,
        crew: StartOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        self.apply(id, HistoryAction::InicioExecucao, None, actor, |order, now| {
            order.start(&crew, actor, now)
        })
        .await
    }

    async fn start_from_programming(
        &self,
        programming_id: Uuid,
        crew: StartOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        let (order, created, anomaly_id) = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), programming_id).await?;
            if programming.status != ProgrammingStatus::Approved {
                return Err(MaintenanceException::ProgrammingTransition {
                    id: programming.id,
                    status: programming.status,
                    action: "executed",
                });
            }
            let now = Utc::now();
            let generated = generate_order(tx.as_ref(), &mut programming, actor, now).await?;
            if generated.created {
                tx.programmings().update(&programming).await?;
            }
            let mut order = generated.order;
            let change = order.start_from_programming(&crew, actor, now)?;
            save(tx, &order, HistoryAction::InicioExecucao, change, None, actor, now).await?;
            Ok((order, generated.created, programming.planning.links.anomaly_id))
        })
        .await?;

        tracing::info!(
            "Started order {} from programming {}",
            order.number,
            order.programming_code
        );
        if created {
            self.anomaly_sync.mark(anomaly_id, AnomalyStatus::OrderGenerated).await;
        }
        Ok(order)
    }

    async fn pause(
        &self,
        id: Uuid,
        reason: String,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        let note = Some(reason.clone());
        self.apply(id, HistoryAction::Pausa, note, actor, move |order, now| {
            order.pause(&reason, now)
        })
        .await
    }

    async fn resume(
        &self,
        id: Uuid,
        reason: String,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        let note = Some(reason.clone());
        self.apply(id, HistoryAction::Retomada, note, actor, move |order, now| {
            order.resume(&reason, now)
        })
        .await
    }

    async fn update_checklist(
        &self,
        id: Uuid,
        update: ChecklistUpdate,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        self.apply(id, HistoryAction::AtualizacaoChecklist, None, actor, |order, now| {
            order.update_checklist(&update, actor, now)
        })
        .await
    }

    async fn register_materials(
        &self,
        id: Uuid,
        update: MaterialUpdate,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        self.apply(id, HistoryAction::RegistroMateriais, None, actor, |order, now| {
            order.register_materials(&update, now)
        })
        .await
    }

    async fn register_tools(
        &self,
        id: Uuid,
        update: ToolUpdate,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        self.apply(id, HistoryAction::RegistroFerramentas, None, actor, |order, now| {
            order.register_tools(&update, now)
        })
        .await
    }

    async fn complete_task(
        &self,
        id: Uuid,
        task_id: Uuid,
        note: Option<String>,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        self.resolve_task(id, task_id, TaskLinkStatus::Completed, note, actor).await
    }

    async fn cancel_task(
        &self,
        id: Uuid,
        task_id: Uuid,
        note: Option<String>,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        self.resolve_task(id, task_id, TaskLinkStatus::Cancelled, note, actor).await
    }

    async fn finish(
        &self,
        id: Uuid,
        result: FinishOrder,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        let order = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut order = load_order(tx.as_ref(), id).await?;
            let returned =
                reservation::returning(tx.reservations(), order.reservation_id, result.odometer_end)
                    .await?;
            let now = Utc::now();
            let change = order.finish(&result, actor, now)?;
            let pending: Vec<&str> = order
                .pending_mandatory_items()
                .iter()
                .map(|item| item.description.as_str())
                .collect();
            if !pending.is_empty() {
                tracing::warn!(
                    "Order {} finished with open mandatory checklist items: {}",
                    order.number,
                    pending.join(", ")
                );
            }
            reservation::finalize(tx.reservations(), returned, result.odometer_end, now).await?;
            let note = Some(result.closure.summary.clone());
            save(tx, &order, HistoryAction::Finalizacao, change, note, actor, now).await?;
            Ok(order)
        })
        .await?;

        tracing::info!(
            "Finished order {}: {:?} min, cost {:?}",
            order.number,
            order.elapsed_minutes,
            order.real_cost
        );
        self.anomaly_sync
            .resolve(
                order.planning.links.anomaly_id,
                order.closure.as_ref().map(|c| c.summary.clone()),
            )
            .await;
        Ok(order)
    }

    async fn cancel(
        &self,
        id: Uuid,
        reason: String,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Order> {
        let order = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut order = load_order(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = order.cancel(&reason, actor, now)?;
            reservation::cancel_active(tx.reservations(), order.reservation_id, &reason, now)
                .await?;
            let note = Some(reason.clone());
            save(tx, &order, HistoryAction::Cancelamento, change, note, actor, now).await?;
            Ok(order)
        })
        .await?;

        tracing::info!("Cancelled order {}", order.number);
        self.anomaly_sync
            .mark(order.planning.links.anomaly_id, AnomalyStatus::Awaiting)
            .await;
        Ok(order)
    }

    async fn history(&self, id: Uuid) -> MaintenanceResult<Vec<HistoryEntry>> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            load_order(tx.as_ref(), id).await?;
            Ok(tx.histories().list_by_owner(HistoryOwner::Order(id)).await?)
        })
        .await
    }
}
