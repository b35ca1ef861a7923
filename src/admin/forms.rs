//! Form records, validation and the add/edit dialog state.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::EntityKind;

/// A flat form submission: field name to raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRecord {
    fields: BTreeMap<String, String>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Raw value of a field; absent fields read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// True when the field is absent or whitespace-only.
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).trim().is_empty()
    }
}

impl FromIterator<(String, String)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        FormRecord {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Required form fields per entity kind.
pub fn required_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::FeaturedEvent => &["name", "time"],
        EntityKind::AgendaEvent => &["title", "time", "weekday"],
        EntityKind::Service => &["name", "time"],
        EntityKind::Roster(_) => &["date", "team"],
        EntityKind::SocialLink => &["name", "url"],
    }
}

/// A submission with required fields missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Preencha todos os campos obrigatórios: {}",
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for ValidationError {}

/// Checks that every required field of the kind is filled in.
pub fn validate(kind: EntityKind, record: &FormRecord) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = required_fields(kind)
        .iter()
        .copied()
        .filter(|field| record.is_blank(field))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

/// Whether the dialog adds a new entry or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit { id: usize },
}

/// Contents of the open dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub kind: EntityKind,
    pub mode: ModalMode,
    pub values: FormRecord,
    pub error: Option<ValidationError>,
}

impl ModalState {
    pub fn title(&self) -> String {
        let prefix = match self.mode {
            ModalMode::Add => "Adicionar",
            ModalMode::Edit { .. } => "Editar",
        };
        format!("{} {}", prefix, self.kind.label())
    }
}

/// Result of submitting the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Record accepted; apply it to the model and show the notice
    Commit {
        kind: EntityKind,
        mode: ModalMode,
        record: FormRecord,
    },
    /// Validation failed; the dialog stays open with the typed values
    Invalid(ValidationError),
    /// No dialog was open
    Ignored,
}

/// Success notice for a committed submission.
pub fn commit_message(kind: EntityKind, mode: ModalMode) -> String {
    let verb = match mode {
        ModalMode::Add => "adicionado",
        ModalMode::Edit { .. } => "atualizado",
    };
    format!("{} {} com sucesso!", kind.label(), verb)
}

/// Drives the add/edit dialog.
///
/// Opening replaces whatever was there before. Submitting validates the
/// record: a valid one closes the dialog and hands the record back, an
/// invalid one keeps the dialog open with the typed values and the
/// error so nothing the administrator entered is lost.
#[derive(Debug, Default)]
pub struct ModalController {
    state: Option<ModalState>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_add(&mut self, kind: EntityKind) {
        self.state = Some(ModalState {
            kind,
            mode: ModalMode::Add,
            values: FormRecord::new(),
            error: None,
        });
    }

    pub fn open_edit(&mut self, kind: EntityKind, id: usize, values: FormRecord) {
        self.state = Some(ModalState {
            kind,
            mode: ModalMode::Edit { id },
            values,
            error: None,
        });
    }

    pub fn close(&mut self) {
        self.state = None;
    }

    pub fn state(&self) -> Option<&ModalState> {
        self.state.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn submit(&mut self, record: FormRecord) -> SubmitOutcome {
        let Some(state) = self.state.as_mut() else {
            return SubmitOutcome::Ignored;
        };

        match validate(state.kind, &record) {
            Ok(()) => {
                let kind = state.kind;
                let mode = state.mode;
                self.state = None;
                SubmitOutcome::Commit { kind, mode, record }
            }
            Err(error) => {
                state.values = record;
                state.error = Some(error.clone());
                SubmitOutcome::Invalid(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RosterCategory;

    #[test]
    fn test_record_absent_field_reads_empty() {
        let record = FormRecord::new().with("name", "Culto");
        assert_eq!(record.get("name"), "Culto");
        assert_eq!(record.get("time"), "");
        assert!(record.is_blank("time"));
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let record = FormRecord::new().with("name", "   ");
        assert!(record.is_blank("name"));
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        let record = FormRecord::new()
            .with("name", "Culto")
            .with("time", "Domingo às 18h");
        assert!(validate(EntityKind::Service, &record).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_url() {
        let record = FormRecord::new().with("name", "Facebook");
        let error = validate(EntityKind::SocialLink, &record).unwrap_err();

        assert_eq!(error.missing, vec!["url"]);
        assert_eq!(
            error.to_string(),
            "Preencha todos os campos obrigatórios: url"
        );
    }

    #[test]
    fn test_validate_lists_fields_in_rule_order() {
        let error = validate(EntityKind::AgendaEvent, &FormRecord::new()).unwrap_err();
        assert_eq!(error.missing, vec!["title", "time", "weekday"]);
    }

    #[test]
    fn test_optional_fields_do_not_block_agenda_events() {
        let record = FormRecord::new()
            .with("title", "Estudo Bíblico")
            .with("time", "19:30")
            .with("weekday", "QUA");
        assert!(validate(EntityKind::AgendaEvent, &record).is_ok());
    }

    #[test]
    fn test_modal_open_add() {
        let mut modal = ModalController::new();
        modal.open_add(EntityKind::FeaturedEvent);

        let state = modal.state().unwrap();
        assert_eq!(state.mode, ModalMode::Add);
        assert_eq!(state.title(), "Adicionar Evento");
        assert!(state.error.is_none());
    }

    #[test]
    fn test_modal_invalid_submit_keeps_values() {
        let mut modal = ModalController::new();
        modal.open_add(EntityKind::SocialLink);

        let outcome = modal.submit(FormRecord::new().with("name", "Facebook"));

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        let state = modal.state().unwrap();
        assert_eq!(state.values.get("name"), "Facebook");
        assert_eq!(state.error.as_ref().unwrap().missing, vec!["url"]);
    }

    #[test]
    fn test_modal_valid_submit_closes_and_commits() {
        let mut modal = ModalController::new();
        modal.open_edit(
            EntityKind::Roster(RosterCategory::Sound),
            1,
            FormRecord::new(),
        );

        let record = FormRecord::new()
            .with("date", "21/06/2025 - Domingo")
            .with("team", "Operador 3");
        let outcome = modal.submit(record.clone());

        assert_eq!(
            outcome,
            SubmitOutcome::Commit {
                kind: EntityKind::Roster(RosterCategory::Sound),
                mode: ModalMode::Edit { id: 1 },
                record,
            }
        );
        assert!(!modal.is_open());
    }

    #[test]
    fn test_modal_submit_without_open_dialog_is_ignored() {
        let mut modal = ModalController::new();
        let outcome = modal.submit(FormRecord::new());
        assert_eq!(outcome, SubmitOutcome::Ignored);
    }

    #[test]
    fn test_commit_messages() {
        assert_eq!(
            commit_message(EntityKind::FeaturedEvent, ModalMode::Add),
            "Evento adicionado com sucesso!"
        );
        assert_eq!(
            commit_message(
                EntityKind::Roster(RosterCategory::Worship),
                ModalMode::Edit { id: 0 }
            ),
            "Escala de Louvor atualizado com sucesso!"
        );
    }
}
