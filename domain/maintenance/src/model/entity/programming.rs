use std::fmt;

use architecture::AggregateRoot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::history::StatusChange;
use super::planning::Planning;
use crate::exception::{ensure_non_negative, ensure_text, MaintenanceException, MaintenanceResult};
use crate::model::vo::{Approval, Rejection};

/// # Programação OS
/// A maintenance request being planned, reviewed and approved before any
/// field work happens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Programming {
    pub id: Uuid,
    /// `PRG-<year>-<seq>`
    pub code: String,
    pub status: ProgrammingStatus,
    pub planning: Planning,
    pub audit: ProgrammingAudit,
    /// Order generated on approval.
    pub order_id: Option<Uuid>,
    /// Vehicle reservation held while the programming owns it.
    pub reservation_id: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AggregateRoot for Programming {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingAudit {
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub analyzed_by: Option<Uuid>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub improvement_suggestion: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    pub deleted_by: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ProgrammingStatus {
    /// # Rascunho
    /// Saved but not yet submitted for review.
    #[serde(rename = "RASCUNHO")]
    Draft,
    /// # Pendente
    #[default]
    #[serde(rename = "PENDENTE")]
    Pending,
    /// # Em análise
    #[serde(rename = "EM_ANALISE")]
    InAnalysis,
    /// # Aprovada
    /// An order has been generated.
    #[serde(rename = "APROVADA")]
    Approved,
    /// # Rejeitada
    #[serde(rename = "REJEITADA")]
    Rejected,
    /// # Cancelada
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl fmt::Display for ProgrammingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProgrammingStatus::Draft => "RASCUNHO",
            ProgrammingStatus::Pending => "PENDENTE",
            ProgrammingStatus::InAnalysis => "EM_ANALISE",
            ProgrammingStatus::Approved => "APROVADA",
            ProgrammingStatus::Rejected => "REJEITADA",
            ProgrammingStatus::Cancelled => "CANCELADA",
        })
    }
}

impl Programming {
    pub fn new(
        code: String,
        planning: Planning,
        draft: bool,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            status: if draft {
                ProgrammingStatus::Draft
            } else {
                ProgrammingStatus::Pending
            },
            planning,
            audit: ProgrammingAudit {
                created_by: actor,
                created_at: now,
                updated_at: now,
                ..Default::default()
            },
            order_id: None,
            reservation_id: None,
            deleted_at: None,
        }
    }

    pub fn format_code(year: i32, sequence: u32) -> String {
        format!("PRG-{year}-{sequence:04}")
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Only drafts and pending programmings can be edited in place.
    pub fn ensure_editable(&self) -> MaintenanceResult<()> {
        self.ensure_status(&[ProgrammingStatus::Draft, ProgrammingStatus::Pending], "updated")
    }

    pub fn touch(&mut self, now: DateTime<Utc>) -> StatusChange {
        self.audit.updated_at = now;
        StatusChange::unchanged(self.status)
    }

    pub fn submit(&mut self, now: DateTime<Utc>) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[ProgrammingStatus::Draft], "submitted")?;
        Ok(self.transition(ProgrammingStatus::Pending, now))
    }

    pub fn analyze(
        &mut self,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[ProgrammingStatus::Pending], "analyzed")?;
        self.audit.analyzed_by = actor;
        self.audit.analyzed_at = Some(now);
        Ok(self.transition(ProgrammingStatus::InAnalysis, now))
    }

    /// Flips to approved and applies the reviewer's adjustments to the
    /// planning. Order generation is up to the caller.
    pub fn approve(
        &mut self,
        approval: &Approval,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[ProgrammingStatus::InAnalysis], "approved")?;
        let suggested = approval.suggested_schedule()?;
        if let Some(budget) = approval.budget_override {
            ensure_non_negative("budgetOverride", budget)?;
            self.planning.budget_estimate = budget;
        }
        if suggested.is_some() {
            self.planning.scheduled_at = suggested;
        }
        self.audit.approved_by = actor;
        self.audit.approved_at = Some(now);
        self.audit.approval_notes = approval.notes.clone();
        Ok(self.transition(ProgrammingStatus::Approved, now))
    }

    pub fn reject(
        &mut self,
        rejection: &Rejection,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        self.ensure_status(&[ProgrammingStatus::InAnalysis], "rejected")?;
        ensure_text("reason", &rejection.reason)?;
        self.audit.rejected_by = actor;
        self.audit.rejected_at = Some(now);
        self.audit.rejection_reason = Some(rejection.reason.clone());
        self.audit.improvement_suggestion = rejection.improvement_suggestion.clone();
        Ok(self.transition(ProgrammingStatus::Rejected, now))
    }

    pub fn cancel(
        &mut self,
        reason: &str,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        if matches!(self.status, ProgrammingStatus::Approved | ProgrammingStatus::Cancelled) {
            return Err(self.transition_error("cancelled"));
        }
        ensure_text("reason", reason)?;
        self.audit.cancelled_by = actor;
        self.audit.cancelled_at = Some(now);
        self.audit.cancel_reason = Some(reason.to_string());
        Ok(self.transition(ProgrammingStatus::Cancelled, now))
    }

    /// Marks the programming deleted. Its status is kept.
    pub fn soft_delete(
        &mut self,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> MaintenanceResult<StatusChange> {
        if self.status == ProgrammingStatus::Approved {
            return Err(self.transition_error("deleted"));
        }
        self.deleted_at = Some(now);
        self.audit.deleted_by = actor;
        Ok(self.touch(now))
    }

    fn ensure_status(
        &self,
        allowed: &[ProgrammingStatus],
        action: &'static str,
    ) -> MaintenanceResult<()> {
        if !allowed.contains(&self.status) {
            return Err(self.transition_error(action));
        }
        Ok(())
    }

    fn transition_error(&self, action: &'static str) -> MaintenanceException {
        MaintenanceException::ProgrammingTransition {
            id: self.id,
            status: self.status,
            action,
        }
    }

    fn transition(&mut self, next: ProgrammingStatus, now: DateTime<Utc>) -> StatusChange {
        let change = StatusChange::new(self.status, next);
        self.status = next;
        self.audit.updated_at = now;
        change
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    use super::*;
    use crate::model::entity::planning::tests::planning;

    fn programming(status: ProgrammingStatus) -> Programming {
        let mut p = Programming::new(
            Programming::format_code(2026, 1),
            planning(),
            false,
            None,
            Utc::now(),
        );
        p.status = status;
        p
    }

    #[test]
    fn code_is_zero_padded() {
        assert_eq!(Programming::format_code(2026, 7), "PRG-2026-0007");
        assert_eq!(Programming::format_code(2026, 12345), "PRG-2026-12345");
    }

    #[test]
    fn analyze_only_from_pending() {
        let mut p = programming(ProgrammingStatus::Pending);
        let change = p.analyze(None, Utc::now()).unwrap();
        assert_eq!(change, StatusChange::new("PENDENTE", "EM_ANALISE"));
        assert!(p.audit.analyzed_at.is_some());

        let err = p.analyze(None, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            MaintenanceException::ProgrammingTransition {
                status: ProgrammingStatus::InAnalysis,
                ..
            }
        ));
    }

    #[test]
    fn approve_requires_analysis() {
        for status in [
            ProgrammingStatus::Draft,
            ProgrammingStatus::Pending,
            ProgrammingStatus::Approved,
            ProgrammingStatus::Rejected,
            ProgrammingStatus::Cancelled,
        ] {
            let mut p = programming(status);
            assert!(p.approve(&Approval::default(), None, Utc::now()).is_err());
            assert_eq!(p.status, status);
        }
    }

    #[test]
    fn approve_applies_budget_and_suggested_schedule() {
        let mut p = programming(ProgrammingStatus::InAnalysis);
        let approval = Approval {
            notes: Some("Priorizar antes da chuva".to_string()),
            budget_override: Some(900.0),
            suggested_date: NaiveDate::from_ymd_opt(2026, 11, 3),
            suggested_time: NaiveTime::from_hms_opt(8, 30, 0),
        };
        p.approve(&approval, None, Utc::now()).unwrap();
        assert_eq!(p.status, ProgrammingStatus::Approved);
        assert_eq!(p.planning.budget_estimate, 900.0);
        assert_eq!(
            p.planning.scheduled_at,
            Some(Utc.with_ymd_and_hms(2026, 11, 3, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn partial_suggested_schedule_is_invalid_and_keeps_status() {
        let mut p = programming(ProgrammingStatus::InAnalysis);
        let approval = Approval {
            suggested_date: NaiveDate::from_ymd_opt(2026, 11, 3),
            ..Default::default()
        };
        let err = p.approve(&approval, None, Utc::now()).unwrap_err();
        assert!(matches!(err, MaintenanceException::PartialSuggestedSchedule));
        assert_eq!(p.status, ProgrammingStatus::InAnalysis);
    }

    #[test]
    fn cancel_refuses_approved_and_cancelled() {
        for status in [ProgrammingStatus::Approved, ProgrammingStatus::Cancelled] {
            let mut p = programming(status);
            assert!(p.cancel("Sem verba", None, Utc::now()).is_err());
            assert_eq!(p.status, status);
        }
        let mut p = programming(ProgrammingStatus::Rejected);
        p.cancel("Sem verba", None, Utc::now()).unwrap();
        assert_eq!(p.status, ProgrammingStatus::Cancelled);
    }

    #[test]
    fn reject_needs_reason() {
        let mut p = programming(ProgrammingStatus::InAnalysis);
        let rejection = Rejection {
            reason: " ".to_string(),
            improvement_suggestion: None,
        };
        assert!(matches!(
            p.reject(&rejection, None, Utc::now()),
            Err(MaintenanceException::Validation { field: "reason", .. })
        ));
    }

    #[test]
    fn approved_programming_can_not_be_deleted() {
        let mut p = programming(ProgrammingStatus::Approved);
        assert!(p.soft_delete(None, Utc::now()).is_err());
        assert!(!p.is_deleted());

        let mut p = programming(ProgrammingStatus::Rejected);
        p.soft_delete(None, Utc::now()).unwrap();
        assert!(p.is_deleted());
        assert_eq!(p.status, ProgrammingStatus::Rejected);
    }
}
