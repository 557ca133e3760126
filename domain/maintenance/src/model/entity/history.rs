use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Histórico
/// Immutable audit record of one transition or data change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub owner: HistoryOwner,
    pub action: HistoryAction,
    pub actor: Option<Uuid>,
    pub at: DateTime<Utc>,
    pub note: Option<String>,
    pub previous_status: Option<String>,
    pub next_status: Option<String>,
}

/// Entity a history entry belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "tipo", content = "id")]
pub enum HistoryOwner {
    #[serde(rename = "PROGRAMACAO")]
    Programming(Uuid),
    #[serde(rename = "ORDEM")]
    Order(Uuid),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Criacao,
    Submissao,
    Atualizacao,
    Analise,
    Aprovacao,
    Rejeicao,
    Cancelamento,
    Exclusao,
    CriacaoAuto,
    Programacao,
    InicioExecucao,
    Pausa,
    Retomada,
    AtualizacaoChecklist,
    RegistroMateriais,
    RegistroFerramentas,
    TarefaConcluida,
    TarefaCancelada,
    Finalizacao,
}

/// Status codes before and after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: String,
    pub next: String,
}

impl StatusChange {
    pub fn new(previous: impl Display, next: impl Display) -> Self {
        Self {
            previous: previous.to_string(),
            next: next.to_string(),
        }
    }

    /// Data change that leaves the status as it is.
    pub fn unchanged(status: impl Display) -> Self {
        let status = status.to_string();
        Self {
            previous: status.clone(),
            next: status,
        }
    }
}

impl fmt::Display for HistoryOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryOwner::Programming(id) => write!(f, "programming {id}"),
            HistoryOwner::Order(id) => write!(f, "order {id}"),
        }
    }
}

impl HistoryEntry {
    pub fn new(
        owner: HistoryOwner,
        action: HistoryAction,
        actor: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            action,
            actor,
            at,
            note: None,
            previous_status: None,
            next_status: None,
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn with_change(mut self, change: StatusChange) -> Self {
        self.previous_status = Some(change.previous);
        self.next_status = Some(change.next);
        self
    }

    /// For entries that bring an entity into existence.
    pub fn with_next_status(mut self, next: impl Display) -> Self {
        self.previous_status = None;
        self.next_status = Some(next.to_string());
        self
    }

    /// Copy of this entry under another owner, with `prefix` prepended to the
    /// note to show where it came from.
    pub fn copied_to(&self, owner: HistoryOwner, prefix: &str) -> Self {
        let note = match &self.note {
            Some(note) => format!("[{prefix}] {note}"),
            None => format!("[{prefix}] "),
        };
        Self {
            id: Uuid::new_v4(),
            owner,
            note: Some(note),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tags_use_portuguese_codes() {
        assert_eq!(
            serde_json::to_value(HistoryAction::InicioExecucao).unwrap(),
            "INICIO_EXECUCAO"
        );
        assert_eq!(
            serde_json::to_value(HistoryAction::AtualizacaoChecklist).unwrap(),
            "ATUALIZACAO_CHECKLIST"
        );
        assert_eq!(serde_json::to_value(HistoryAction::CriacaoAuto).unwrap(), "CRIACAO_AUTO");
    }

    #[test]
    fn copy_keeps_action_and_prefixes_note() {
        let programming = Uuid::new_v4();
        let order = Uuid::new_v4();
        let entry = HistoryEntry::new(
            HistoryOwner::Programming(programming),
            HistoryAction::Analise,
            None,
            Utc::now(),
        )
        .with_note(Some("Tudo certo".to_string()))
        .with_change(StatusChange::new("PENDENTE", "EM_ANALISE"));

        let copy = entry.copied_to(HistoryOwner::Order(order), "PRG-2026-0001");
        assert_ne!(copy.id, entry.id);
        assert_eq!(copy.owner, HistoryOwner::Order(order));
        assert_eq!(copy.action, HistoryAction::Analise);
        assert_eq!(copy.at, entry.at);
        assert_eq!(copy.note.as_deref(), Some("[PRG-2026-0001] Tudo certo"));
        assert_eq!(copy.next_status.as_deref(), Some("EM_ANALISE"));
    }

    #[test]
    fn copy_of_empty_note_is_just_the_prefix() {
        let entry = HistoryEntry::new(
            HistoryOwner::Programming(Uuid::new_v4()),
            HistoryAction::Criacao,
            None,
            Utc::now(),
        );
        let copy = entry.copied_to(HistoryOwner::Order(Uuid::new_v4()), "PRG-2026-0007");
        assert_eq!(copy.note.as_deref(), Some("[PRG-2026-0007] "));
    }
}
