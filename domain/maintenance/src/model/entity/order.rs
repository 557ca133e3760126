use std::fmt;

use architecture::AggregateRoot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::checklist::{default_checklist, ChecklistItem};
use super::history::StatusChange;
use super::planning::Planning;
use super::programming::Programming;
use super::resource::{ResourceKind, TaskLinkStatus};
use crate::exception::{ensure_non_negative, ensure_text, MaintenanceException, MaintenanceResult};
use crate::model::vo::{
    ChecklistUpdate, Closure, FinishOrder, MaterialUpdate, ScheduleOrder, StartOrder, ToolUpdate,
};

/// # Ordem de Serviço
/// Field-executable unit generated from an approved programming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    /// `OS-<year>-<seq>`
    pub number: String,
    pub programming_id: Uuid,
    pub programming_code: String,
    pub status: OrderStatus,
    /// Copied from the programming when the order was generated.
    pub planning: Planning,
    pub team: Vec<String>,
    pub team_present: Vec<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub elapsed_minutes: Option<i64>,
    pub real_cost: Option<f64>,
    pub closure: Option<Closure>,
    pub checklist: Vec<ChecklistItem>,
    pub time_logs: Vec<TimeLogEntry>,
    pub reservation_id: Option<Uuid>,
    pub pause_reason: Option<String>,
    pub cancel_reason: Option<String>,
    pub audit: OrderAudit,
}

impl AggregateRoot for Order {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderAudit {
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub scheduled_by: Option<Uuid>,
    pub started_by: Option<Uuid>,
    pub finished_by: Option<Uuid>,
    pub cancelled_by: Option<Uuid>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Work period; open while `ended_at` is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeLogEntry {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// # Planejada
    /// Generated, waiting to be scheduled.
    #[default]
    #[serde(rename = "PLANEJADA")]
    Planned,
    /// # Programada
    #[serde(rename = "PROGRAMADA")]
    Programmed,
    /// # Em execução
    #[serde(rename = "EM_EXECUCAO")]
    InExecution,
    /// # Pausada
    #[serde(rename = "PAUSADA")]
    Paused,
    /// # Finalizada
    #[serde(rename = "FINALIZADA")]
    Finished,
    /// # Cancelada
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Planned => "PLANEJADA",
            OrderStatus::Programmed => "PROGRAMADA",
            OrderStatus::InExecution => "EM_EXECUCAO",
            OrderStatus::Paused => "PAUSADA",
            OrderStatus::Finished => "FINALIZADA",
            OrderStatus::Cancelled => "CANCELADA",
        })
    }
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Finished | OrderStatus::Cancelled)
    }
}

/// Whole minutes between `start` and `end`, rounded; `None` without a start.
pub fn elapsed_minutes(start: Option<DateTime<Utc>>, end: DateTime<Utc>) -> Option<i64> {
    start.map(|start| {
        let millis = (end - start).num_milliseconds() as f64;
        (millis / 60_000.0).round() as i64
    })
}

impl Order {
    /// New planned order cloned from an approved programming, with the
    /// default checklist.
    pub fn from_programming(
        programming: &Programming,
        number: String,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            programming_id: programming.id,
            programming_code: programming.code.clone(),
            status: OrderStatus::Planned,
            planning: programming.planning.cloned_for_order(),
            team: Vec::new(),
            team_present: Vec::new(),
            started_at: None,
            finished_at: None,
            elapsed_minutes: None,
            real_cost: None,
            closure: None,
            checklist: default_checklist(),
            time_logs: Vec::new(),
            reservation_id: None,
            pause_reason: None,
            cancel_reason: None,
            audit: OrderAudit {
                created_by: actor,
                created_at: now,
                updated_at: now,
                ..Default::default()
            },
        }
    }

    pub fn format_number(year: i32, sequence: u32) -> String {
        format!("OS-{year}-{sequence:04}")
    }

    /// Adds the default checklist when the order has none.
    pub fn ensure_checklist(&mut self) {
        if self.checklist.is_empty() {
            self.checklist = default_checklist();
        }
    }

    /// Mandatory checklist items still open.
    pub fn pending_mandatory_items(&self) -> Vec<&ChecklistItem> {
        self.checklist.iter().filter(|i| i.mandatory && !i.completed).collect()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) -> StatusChange {
        self.audit.updated_at = now;
        StatusChange::unchanged(self.status)
    }

    /// `programar`: confirms the listed lines and sets the schedule.
    pub fn schedule(
        &mut self,
        plan: &ScheduleOrder,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[OrderStatus::Planned], "scheduled")?;
        if let Some(request) = &plan.vehicle_request {
            request.validate()?;
        }
        let order_id = self.id;
        let not_found = |kind, line_id| MaintenanceException::ResourceLineNotFound {
            kind,
            order_id,
            line_id,
        };
        // Look every id up before touching anything.
        for id in &plan.confirm_materials {
            if !self.planning.resources.materials.iter().any(|m| m.id == *id) {
                return Err(not_found(ResourceKind::Material, *id));
            }
        }
        for id in &plan.confirm_tools {
            if !self.planning.resources.tools.iter().any(|t| t.id == *id) {
                return Err(not_found(ResourceKind::Tool, *id));
            }
        }
        for id in &plan.confirm_technicians {
            if !self.planning.resources.technicians.iter().any(|t| t.id == *id) {
                return Err(not_found(ResourceKind::Technician, *id));
            }
        }

        let resources = &mut self.planning.resources;
        resources
            .materials
            .iter_mut()
            .filter(|m| plan.confirm_materials.contains(&m.id))
            .for_each(|m| m.confirmed = true);
        resources
            .tools
            .iter_mut()
            .filter(|t| plan.confirm_tools.contains(&t.id))
            .for_each(|t| t.confirmed = true);
        resources
            .technicians
            .iter_mut()
            .filter(|t| plan.confirm_technicians.contains(&t.id))
            .for_each(|t| t.confirmed = true);

        self.planning.scheduled_at = Some(plan.scheduled_at);
        if plan.responsible.is_some() {
            self.planning.responsible = plan.responsible.clone();
        }
        self.team = plan.team.clone();
        if let Some(request) = &plan.vehicle_request {
            self.planning.needs_vehicle = true;
            self.planning.vehicle_request = Some(request.clone());
        }
        self.ensure_checklist();
        self.audit.scheduled_by = actor;
        Ok(self.transition(OrderStatus::Programmed, now))
    }

    /// `iniciar`: only a scheduled order starts.
    pub fn start(
        &mut self,
        crew: &StartOrder,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[OrderStatus::Programmed], "started")?;
        Ok(self.begin_execution(crew, actor, now))
    }

    /// Start for callers that skip scheduling.
    pub fn start_from_programming(
        &mut self,
        crew: &StartOrder,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[OrderStatus::Planned, OrderStatus::Programmed], "started")?;
        self.ensure_checklist();
        Ok(self.begin_execution(crew, actor, now))
    }

    pub fn pause(
        &mut self,
        reason: &str,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[OrderStatus::InExecution], "paused")?;
        ensure_text("reason", reason)?;
        self.close_time_log(now);
        self.pause_reason = Some(reason.to_string());
        Ok(self.transition(OrderStatus::Paused, now))
    }

    pub fn resume(
        &mut self,
        reason: &str,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[OrderStatus::Paused], "resumed")?;
        ensure_text("reason", reason)?;
        self.open_time_log(now, Some(reason.to_string()));
        self.pause_reason = None;
        Ok(self.transition(OrderStatus::InExecution, now))
    }

    pub fn update_checklist(
        &mut self,
        update: &ChecklistUpdate,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_open("updated")?;
        for mark in &update.items {
            if !self.checklist.iter().any(|i| i.id == mark.item_id) {
                return Err(MaintenanceException::ChecklistItemNotFound {
                    order_id: self.id,
                    item_id: mark.item_id,
                });
            }
        }
        for mark in &update.items {
            if let Some(item) = self.checklist.iter_mut().find(|i| i.id == mark.item_id) {
                item.mark(mark.completed, mark.note.clone(), actor, now);
            }
        }
        Ok(self.touch(now))
    }

    pub fn register_materials(
        &mut self,
        update: &MaterialUpdate,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_open("updated")?;
        let consuming = update.items.iter().any(|m| m.consumed_quantity.is_some());
        if consuming && !self.is_executing() {
            return Err(MaintenanceException::ConsumptionOutsideExecution {
                id: self.id,
                status: self.status,
            });
        }
        for mark in &update.items {
            if let Some(consumed) = mark.consumed_quantity {
                ensure_non_negative("consumedQuantity", consumed)?;
            }
            if !self.planning.resources.materials.iter().any(|m| m.id == mark.line_id) {
                return Err(self.line_not_found(ResourceKind::Material, mark.line_id));
            }
        }
        for mark in &update.items {
            if let Some(line) = self.planning.resources.material_mut(mark.line_id) {
                line.confirmed = mark.confirmed.unwrap_or(line.confirmed);
                line.available = mark.available.unwrap_or(line.available);
                if mark.consumed_quantity.is_some() {
                    line.consumed_quantity = mark.consumed_quantity;
                }
                if mark.notes.is_some() {
                    line.notes = mark.notes.clone();
                }
            }
        }
        Ok(self.touch(now))
    }

    pub fn register_tools(
        &mut self,
        update: &ToolUpdate,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_open("updated")?;
        for mark in &update.items {
            if !self.planning.resources.tools.iter().any(|t| t.id == mark.line_id) {
                return Err(self.line_not_found(ResourceKind::Tool, mark.line_id));
            }
        }
        for mark in &update.items {
            if let Some(line) = self.planning.resources.tool_mut(mark.line_id) {
                line.confirmed = mark.confirmed.unwrap_or(line.confirmed);
                line.available = mark.available.unwrap_or(line.available);
                line.used = mark.used.unwrap_or(line.used);
                if mark.returned_condition.is_some() {
                    line.returned_condition = mark.returned_condition.clone();
                }
            }
        }
        Ok(self.touch(now))
    }

    /// Resolves a pending task link as completed or cancelled.
    pub fn resolve_task(
        &mut self,
        task_id: Uuid,
        outcome: TaskLinkStatus,
        note: Option<String>,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_open("updated")?;
        let order_id = self.id;
        let link = self
            .planning
            .task_links
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(MaintenanceException::TaskLinkNotFound { order_id, task_id })?;
        if link.status != TaskLinkStatus::Pending {
            return Err(MaintenanceException::TaskLinkNotPending {
                order_id,
                task_id,
                status: link.status,
            });
        }
        link.resolve(outcome, note, actor, now);
        Ok(self.touch(now))
    }

    /// `finalizar`: books the final consumption, then computes elapsed time
    /// and real cost.
    pub fn finish(
        &mut self,
        result: &FinishOrder,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[OrderStatus::InExecution, OrderStatus::Paused], "finished")?;
        result.closure.validate()?;
        let ended_at = result.finished_at.unwrap_or(now);
        if let Some(started_at) = self.started_at {
            if ended_at < started_at {
                return Err(MaintenanceException::validation(
                    "finishedAt",
                    format!("{ended_at} is before the start {started_at}"),
                ));
            }
        }
        for consumption in &result.materials {
            ensure_non_negative("consumedQuantity", consumption.consumed_quantity)?;
            if !self.planning.resources.materials.iter().any(|m| m.id == consumption.line_id) {
                return Err(self.line_not_found(ResourceKind::Material, consumption.line_id));
            }
        }
        for hours in &result.technicians {
            ensure_non_negative("hoursWorked", hours.hours_worked)?;
            if !self.planning.resources.technicians.iter().any(|t| t.id == hours.line_id) {
                return Err(self.line_not_found(ResourceKind::Technician, hours.line_id));
            }
        }
        if let Some(odometer) = result.odometer_end {
            ensure_non_negative("odometerEnd", odometer)?;
        }

        for consumption in &result.materials {
            if let Some(line) = self.planning.resources.material_mut(consumption.line_id) {
                line.consumed_quantity = Some(consumption.consumed_quantity);
            }
        }
        for hours in &result.technicians {
            if let Some(line) = self.planning.resources.technician_mut(hours.line_id) {
                line.hours_worked = Some(hours.hours_worked);
            }
        }

        self.close_time_log(ended_at);
        self.finished_at = Some(ended_at);
        self.elapsed_minutes = elapsed_minutes(self.started_at, ended_at);
        self.real_cost = Some(self.planning.resources.real_cost());
        self.closure = Some(result.closure.clone());
        self.audit.finished_by = actor;
        Ok(self.transition(OrderStatus::Finished, now))
    }

    pub fn cancel(
        &mut self,
        reason: &str,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_open("cancelled")?;
        ensure_text("reason", reason)?;
        self.close_time_log(now);
        self.cancel_reason = Some(reason.to_string());
        self.audit.cancelled_by = actor;
        self.audit.cancelled_at = Some(now);
        Ok(self.transition(OrderStatus::Cancelled, now))
    }

    fn is_executing(&self) -> bool {
        matches!(self.status, OrderStatus::InExecution | OrderStatus::Paused)
    }

    fn begin_execution(
        &mut self,
        crew: &StartOrder,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> StatusChange {
        let started_at = crew.started_at.unwrap_or(now);
        self.started_at = Some(started_at);
        self.team_present = crew.team_present.clone();
        self.audit.started_by = actor;
        self.open_time_log(started_at, None);
        self.transition(OrderStatus::InExecution, now)
    }

    fn open_time_log(&mut self, at: DateTime<Utc>, note: Option<String>) {
        self.time_logs.push(TimeLogEntry {
            id: Uuid::new_v4(),
            started_at: at,
            ended_at: None,
            note,
        });
    }

    fn close_time_log(&mut self, at: DateTime<Utc>) {
        if let Some(open) = self.time_logs.iter_mut().rev().find(|l| l.ended_at.is_none()) {
            open.ended_at = Some(at.max(open.started_at));
        }
    }

    fn ensure_open(&self, action: &'static str) -> MaintenanceResult<()> {
        if self.status.is_terminal() {
            return Err(self.transition_error(action));
        }
        Ok(())
    }

    fn ensure_status(&self, allowed: &[OrderStatus], action: &'static str) -> MaintenanceResult<()> {
        if !allowed.contains(&self.status) {
            return Err(self.transition_error(action));
        }
        Ok(())
    }

    fn transition_error(&self, action: &'static str) -> MaintenanceException {
        MaintenanceException::OrderTransition {
            id: self.id,
            status: self.status,
            action,
        }
    }

    fn line_not_found(&self, kind: ResourceKind, line_id: Uuid) -> MaintenanceException {
        MaintenanceException::ResourceLineNotFound {
            kind,
            order_id: self.id,
            line_id,
        }
    }

    fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> StatusChange {
        let change = StatusChange::new(self.status, next);
        self.status = next;
        self.audit.updated_at = now;
        change
    }
}
