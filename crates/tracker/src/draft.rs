use api_types::{
    Amount,
    expense::{Expense, ExpenseId, ExpenseNew},
};
use chrono::NaiveDate;

use crate::error::{DraftProblem, TrackerError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a single expense may carry (one billion).
pub const MAX_AMOUNT: Amount = Amount::new(100_000_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Amount,
    Description,
    Category,
    Date,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Amount,
        DraftField::Description,
        DraftField::Category,
        DraftField::Date,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    /// Empty form.
    Idle,
    /// Fields entered for a new expense.
    Creating,
    /// Form pre-filled from an existing expense.
    Editing(ExpenseId),
}

/// The expense form in progress.
///
/// Fields hold raw text; nothing is validated until [`Draft::payload`].
/// While a submit is in flight the draft is locked and refuses changes.
#[derive(Debug, Clone)]
pub struct Draft {
    amount: String,
    description: String,
    category: String,
    date: String,
    mode: DraftMode,
    locked: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category: String::new(),
            date: String::new(),
            mode: DraftMode::Idle,
            locked: false,
        }
    }
}

impl Draft {
    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn editing_id(&self) -> Option<&ExpenseId> {
        match &self.mode {
            DraftMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Amount => &self.amount,
            DraftField::Description => &self.description,
            DraftField::Category => &self.category,
            DraftField::Date => &self.date,
        }
    }

    pub fn push(&mut self, field: DraftField, ch: char) -> Result<(), TrackerError> {
        self.field_mut(field)?.push(ch);
        Ok(())
    }

    pub fn pop(&mut self, field: DraftField) -> Result<(), TrackerError> {
        self.field_mut(field)?.pop();
        Ok(())
    }

    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), TrackerError> {
        let slot = self.field_mut(field)?;
        slot.clear();
        slot.push_str(value);
        Ok(())
    }

    /// Copies `expense` into the form and targets it for update. The date
    /// loses its time component.
    pub fn begin_edit(&mut self, expense: &Expense) -> Result<(), TrackerError> {
        if self.locked {
            return Err(TrackerError::DraftLocked);
        }
        self.amount = expense.amount.to_string();
        self.description = expense.description.clone().unwrap_or_default();
        self.category = expense.category.clone().unwrap_or_default();
        self.date = expense.day().format(DATE_FORMAT).to_string();
        self.mode = DraftMode::Editing(expense.id.clone());
        Ok(())
    }

    /// Drops whatever is in progress and returns to `Idle`.
    pub fn cancel(&mut self) -> Result<(), TrackerError> {
        if self.locked {
            return Err(TrackerError::DraftLocked);
        }
        self.reset();
        Ok(())
    }

    /// Builds the request body. Amount and date are required; empty
    /// description and category become `None`.
    pub fn payload(&self) -> Result<ExpenseNew, TrackerError> {
        let amount_raw = self.amount.trim();
        if amount_raw.is_empty() {
            return Err(TrackerError::InvalidDraft(DraftProblem::MissingAmount));
        }
        let amount: Amount = amount_raw
            .parse()
            .map_err(|_| TrackerError::InvalidDraft(DraftProblem::BadAmount))?;
        if amount.is_negative() {
            return Err(TrackerError::InvalidDraft(DraftProblem::NegativeAmount));
        }
        if amount > MAX_AMOUNT {
            return Err(TrackerError::InvalidDraft(DraftProblem::TooLarge));
        }

        let date_raw = self.date.trim();
        if date_raw.is_empty() {
            return Err(TrackerError::InvalidDraft(DraftProblem::MissingDate));
        }
        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
            .map_err(|_| TrackerError::InvalidDraft(DraftProblem::BadDate))?;

        Ok(ExpenseNew {
            amount,
            description: non_empty(&self.description),
            category: non_empty(&self.category),
            date,
        })
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn field_mut(&mut self, field: DraftField) -> Result<&mut String, TrackerError> {
        if self.locked {
            return Err(TrackerError::DraftLocked);
        }
        if self.mode == DraftMode::Idle {
            self.mode = DraftMode::Creating;
        }
        Ok(match field {
            DraftField::Amount => &mut self.amount,
            DraftField::Description => &mut self.description,
            DraftField::Category => &mut self.category,
            DraftField::Date => &mut self.date,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(amount: &str, date: &str) -> Draft {
        let mut draft = Draft::default();
        draft.set(DraftField::Amount, amount).unwrap();
        draft.set(DraftField::Date, date).unwrap();
        draft
    }

    #[test]
    fn first_keystroke_starts_creating() {
        let mut draft = Draft::default();
        assert_eq!(draft.mode(), &DraftMode::Idle);
        draft.push(DraftField::Amount, '5').unwrap();
        assert_eq!(draft.mode(), &DraftMode::Creating);
        assert_eq!(draft.value(DraftField::Amount), "5");
    }

    #[test]
    fn edit_copies_fields_and_truncates_date() {
        let expense = Expense {
            id: ExpenseId::new("42"),
            amount: Amount::new(5000),
            description: Some("Zakupy".to_string()),
            category: Some("Spożywcze".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(18, 45, 12)
                .unwrap(),
        };
        let mut draft = filled("1", "2024-01-01");
        draft.begin_edit(&expense).unwrap();

        assert_eq!(draft.mode(), &DraftMode::Editing(ExpenseId::new("42")));
        assert_eq!(draft.value(DraftField::Amount), "50.00");
        assert_eq!(draft.value(DraftField::Description), "Zakupy");
        assert_eq!(draft.value(DraftField::Category), "Spożywcze");
        assert_eq!(draft.value(DraftField::Date), "2025-06-01");
    }

    #[test]
    fn typing_while_editing_keeps_target() {
        let expense = Expense {
            id: ExpenseId::new("7"),
            amount: Amount::new(100),
            description: None,
            category: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };
        let mut draft = Draft::default();
        draft.begin_edit(&expense).unwrap();
        draft.push(DraftField::Description, 'x').unwrap();
        assert_eq!(draft.editing_id(), Some(&ExpenseId::new("7")));
    }

    #[test]
    fn payload_requires_amount_and_date() {
        assert_eq!(
            filled("", "2025-06-01").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::MissingAmount))
        );
        assert_eq!(
            filled("abc", "2025-06-01").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::BadAmount))
        );
        assert_eq!(
            filled("-3", "2025-06-01").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::NegativeAmount))
        );
        assert_eq!(
            filled("3", "").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::MissingDate))
        );
        assert_eq!(
            filled("3", "01.06.2025").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::BadDate))
        );
    }

    #[test]
    fn payload_caps_amount() {
        assert!(filled("1000000000", "2025-06-01").payload().is_ok());
        assert_eq!(
            filled("1000000000.01", "2025-06-01").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::TooLarge))
        );
        assert_eq!(
            filled("50000000000000000", "2025-06-01").payload(),
            Err(TrackerError::InvalidDraft(DraftProblem::TooLarge))
        );
    }

    #[test]
    fn payload_drops_blank_text_fields() {
        let mut draft = filled("50", "2025-06-01");
        draft.set(DraftField::Description, "  ").unwrap();
        draft.set(DraftField::Category, " Spożywcze ").unwrap();
        let payload = draft.payload().unwrap();
        assert_eq!(payload.amount, Amount::new(5000));
        assert_eq!(payload.description, None);
        assert_eq!(payload.category.as_deref(), Some("Spożywcze"));
    }

    #[test]
    fn locked_draft_refuses_changes() {
        let mut draft = filled("50", "2025-06-01");
        draft.lock();
        assert_eq!(
            draft.push(DraftField::Amount, '0'),
            Err(TrackerError::DraftLocked)
        );
        assert_eq!(draft.cancel(), Err(TrackerError::DraftLocked));
        draft.unlock();
        draft.cancel().unwrap();
        assert_eq!(draft.mode(), &DraftMode::Idle);
        assert_eq!(draft.value(DraftField::Amount), "");
    }
}
