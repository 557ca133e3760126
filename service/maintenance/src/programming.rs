use std::sync::Arc;

use architecture::{MutableRepository, PaginationResult};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use domain_fleet::model::entity::ReservationOwner;
use domain_maintenance::{
    exception::{MaintenanceException, MaintenanceResult},
    model::{
        entity::{HistoryAction, HistoryEntry, HistoryOwner, Programming},
        vo::{
            AnomalyStatus, Approval, ApprovalOutcome, AssetRef, NewProgramming,
            ProgrammingFilter, ProgrammingPatch, Rejection,
        },
    },
    repository::MaintenanceStore,
    service::{AssetLookupService, ProgrammingService},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{
    anomaly_sync::AnomalySynchronizer,
    order_generation::generate_order,
    reference::ensure_exist,
    reservation,
    unit_of_work::{load_programming, within, WorkflowSettings},
};

#[derive(TypedBuilder)]
pub struct ProgrammingServiceImpl {
    store: Arc<dyn MaintenanceStore>,
    asset_lookup: Arc<dyn AssetLookupService>,
    anomaly_sync: AnomalySynchronizer,
    #[builder(default)]
    settings: WorkflowSettings,
}

#[async_trait]
impl ProgrammingService for ProgrammingServiceImpl {
    async fn create(
        &self,
        input: NewProgramming,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming> {
        let (planning, draft) = input.into_planning()?;
        ensure_exist(self.asset_lookup.as_ref(), &planning.references()).await?;

        let programming = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let now = Utc::now();
            let sequence = tx.programmings().next_code_sequence(now.year()).await?;
            let code = Programming::format_code(now.year(), sequence);
            let mut programming = Programming::new(code, planning, draft, actor, now);
            if let Some(request) = programming.planning.wanted_vehicle() {
                let owner = ReservationOwner::Programming(programming.id);
                programming.reservation_id =
                    Some(reservation::open(tx.reservations(), owner, request, now).await?);
            }
            tx.programmings().insert(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(programming.id),
                        HistoryAction::Criacao,
                        actor,
                        now,
                    )
                    .with_next_status(programming.status),
                )
                .await?;
            tx.commit().await?;
            Ok(programming)
        })
        .await?;

        tracing::info!("Created programming {} ({})", programming.code, programming.id);
        self.anomaly_sync
            .mark(programming.planning.links.anomaly_id, AnomalyStatus::InAnalysis)
            .await;
        Ok(programming)
    }

    async fn list(
        &self,
        filter: ProgrammingFilter,
    ) -> MaintenanceResult<PaginationResult<Programming>> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            Ok(tx.programmings().query(&filter).await?)
        })
        .await
    }

    async fn get(&self, id: Uuid) -> MaintenanceResult<Programming> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            load_programming(tx.as_ref(), id).await
        })
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ProgrammingPatch,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming> {
        // Registry lookups happen between two transactions, never inside one.
        let (stored, patched) = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let programming = load_programming(tx.as_ref(), id).await?;
            programming.ensure_editable()?;
            let planning = patch.clone().applied_to(&programming.planning)?;
            Ok((programming.planning.references(), planning.references()))
        })
        .await?;
        let added: Vec<AssetRef> =
            patched.iter().copied().filter(|r| !stored.contains(r)).collect();
        ensure_exist(self.asset_lookup.as_ref(), &added).await?;

        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            programming.ensure_editable()?;
            let planning = patch.applied_to(&programming.planning)?;
            let current = programming.planning.references();
            if planning
                .references()
                .iter()
                .any(|r| !current.contains(r) && !patched.contains(r))
            {
                return Err(MaintenanceException::ConcurrentUpdate { id });
            }

            let now = Utc::now();
            programming.planning = planning;
            programming.reservation_id = reservation::reconcile(
                tx.reservations(),
                ReservationOwner::Programming(programming.id),
                programming.reservation_id,
                programming.planning.wanted_vehicle(),
                now,
            )
            .await?;
            let change = programming.touch(now);
            tx.programmings().update(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(programming.id),
                        HistoryAction::Atualizacao,
                        actor,
                        now,
                    )
                    .with_change(change),
                )
                .await?;
            tx.commit().await?;
            tracing::info!("Updated programming {}", programming.code);
            Ok(programming)
        })
        .await
    }

    async fn submit(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<Programming> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = programming.submit(now)?;
            tx.programmings().update(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(id),
                        HistoryAction::Submissao,
                        actor,
                        now,
                    )
                    .with_change(change),
                )
                .await?;
            tx.commit().await?;
            tracing::info!("Submitted programming {}", programming.code);
            Ok(programming)
        })
        .await
    }

    async fn analyze(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<Programming> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = programming.analyze(actor, now)?;
            tx.programmings().update(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(id),
                        HistoryAction::Analise,
                        actor,
                        now,
                    )
                    .with_change(change),
                )
                .await?;
            tx.commit().await?;
            tracing::info!("Programming {} is under analysis", programming.code);
            Ok(programming)
        })
        .await
    }

    async fn approve(
        &self,
        id: Uuid,
        approval: Approval,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<ApprovalOutcome> {
        let outcome = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = programming.approve(&approval, actor, now)?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(id),
                        HistoryAction::Aprovacao,
                        actor,
                        now,
                    )
                    .with_note(approval.notes.clone())
                    .with_change(change),
                )
                .await?;
            let generated = generate_order(tx.as_ref(), &mut programming, actor, now).await?;
            tx.programmings().update(&programming).await?;
            tx.commit().await?;
            Ok(ApprovalOutcome {
                programming,
                order: generated.order,
            })
        })
        .await?;

        tracing::info!(
            "Approved programming {}, order {}",
            outcome.programming.code,
            outcome.order.number
        );
        self.anomaly_sync
            .mark(
                outcome.programming.planning.links.anomaly_id,
                AnomalyStatus::OrderGenerated,
            )
            .await;
        Ok(outcome)
    }

    async fn reject(
        &self,
        id: Uuid,
        rejection: Rejection,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming> {
        let programming = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = programming.reject(&rejection, actor, now)?;
            tx.programmings().update(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(id),
                        HistoryAction::Rejeicao,
                        actor,
                        now,
                    )
                    .with_note(Some(rejection.reason.clone()))
                    .with_change(change),
                )
                .await?;
            tx.commit().await?;
            Ok(programming)
        })
        .await?;

        tracing::info!("Rejected programming {}", programming.code);
        self.anomaly_sync
            .mark(programming.planning.links.anomaly_id, AnomalyStatus::Awaiting)
            .await;
        Ok(programming)
    }

    async fn cancel(
        &self,
        id: Uuid,
        reason: String,
        actor: Option<Uuid>,
    ) -> MaintenanceResult<Programming> {
        let programming = within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = programming.cancel(&reason, actor, now)?;
            reservation::cancel_active(tx.reservations(), programming.reservation_id, &reason, now)
                .await?;
            tx.programmings().update(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(id),
                        HistoryAction::Cancelamento,
                        actor,
                        now,
                    )
                    .with_note(Some(reason.clone()))
                    .with_change(change),
                )
                .await?;
            tx.commit().await?;
            Ok(programming)
        })
        .await?;

        tracing::info!("Cancelled programming {}", programming.code);
        self.anomaly_sync
            .mark(programming.planning.links.anomaly_id, AnomalyStatus::Awaiting)
            .await;
        Ok(programming)
    }

    async fn delete(&self, id: Uuid, actor: Option<Uuid>) -> MaintenanceResult<()> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            let mut programming = load_programming(tx.as_ref(), id).await?;
            let now = Utc::now();
            let change = programming.soft_delete(actor, now)?;
            reservation::cancel_active(
                tx.reservations(),
                programming.reservation_id,
                "Programação excluída",
                now,
            )
            .await?;
            tx.programmings().update(&programming).await?;
            tx.histories()
                .append(
                    &HistoryEntry::new(
                        HistoryOwner::Programming(id),
                        HistoryAction::Exclusao,
                        actor,
                        now,
                    )
                    .with_change(change),
                )
                .await?;
            tx.commit().await?;
            tracing::info!("Deleted programming {}", programming.code);
            Ok(())
        })
        .await
    }

    async fn history(&self, id: Uuid) -> MaintenanceResult<Vec<HistoryEntry>> {
        within(self.settings.transaction_timeout, async {
            let tx = self.store.begin().await?;
            load_programming(tx.as_ref(), id).await?;
            Ok(tx.histories().list_by_owner(HistoryOwner::Programming(id)).await?)
        })
        .await
    }
}
