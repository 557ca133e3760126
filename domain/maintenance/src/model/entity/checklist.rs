use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Steps every order starts with, in execution order. The flag marks
/// mandatory steps.
const DEFAULT_STEPS: [(&str, bool); 6] = [
    ("Verificar condições de segurança", true),
    ("Conferir materiais e ferramentas", true),
    ("Executar serviço", true),
    ("Testar funcionamento", true),
    ("Limpar área de trabalho", false),
    ("Documentar serviço", true),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: Uuid,
    /// 1 based.
    pub position: u32,
    pub description: String,
    pub mandatory: bool,
    pub completed: bool,
    pub completed_by: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl ChecklistItem {
    pub(crate) fn mark(
        &mut self,
        completed: bool,
        note: Option<String>,
        actor: Option<Uuid>,
        now: DateTime<Utc>,
    ) {
        self.completed = completed;
        if completed {
            self.completed_by = actor;
            self.completed_at = Some(now);
        } else {
            self.completed_by = None;
            self.completed_at = None;
        }
        if note.is_some() {
            self.note = note;
        }
    }
}

pub fn default_checklist() -> Vec<ChecklistItem> {
    DEFAULT_STEPS
        .iter()
        .zip(1..)
        .map(|(&(description, mandatory), position)| ChecklistItem {
            id: Uuid::new_v4(),
            position,
            description: description.to_string(),
            mandatory,
            completed: false,
            completed_by: None,
            completed_at: None,
            note: None,
        })
        .collect()
}
