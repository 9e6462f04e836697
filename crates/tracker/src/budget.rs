use api_types::Amount;

/// What the displayed budget does when saving it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BudgetSavePolicy {
    /// Go back to the last value the server accepted.
    #[default]
    Revert,
    /// Keep showing the value the user typed.
    Keep,
}

/// Budget as displayed, plus the last value confirmed by the server.
#[derive(Debug, Default)]
pub struct BudgetStore {
    displayed: Amount,
    confirmed: Amount,
    policy: BudgetSavePolicy,
}

impl BudgetStore {
    pub fn new(policy: BudgetSavePolicy) -> Self {
        Self {
            displayed: Amount::ZERO,
            confirmed: Amount::ZERO,
            policy,
        }
    }

    pub fn value(&self) -> Amount {
        self.displayed
    }

    pub fn confirmed(&self) -> Amount {
        self.confirmed
    }

    pub fn policy(&self) -> BudgetSavePolicy {
        self.policy
    }

    /// Value read from the server (or the demo value).
    pub fn load(&mut self, value: Amount) {
        self.displayed = value;
        self.confirmed = value;
    }

    /// Shows `value` right away, before the server has seen it.
    pub fn edit(&mut self, value: Amount) {
        self.displayed = value;
    }

    pub fn confirm(&mut self, value: Amount) {
        self.confirmed = value;
    }

    /// Applies the save-failure policy. Returns `true` if the display changed.
    pub fn reject(&mut self) -> bool {
        match self.policy {
            BudgetSavePolicy::Revert if self.displayed != self.confirmed => {
                self.displayed = self.confirmed;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_policy_restores_confirmed_value() {
        let mut budget = BudgetStore::new(BudgetSavePolicy::Revert);
        budget.load(Amount::new(1000));
        budget.edit(Amount::new(5000));
        assert_eq!(budget.value(), Amount::new(5000));

        assert!(budget.reject());
        assert_eq!(budget.value(), Amount::new(1000));
    }

    #[test]
    fn keep_policy_leaves_display_alone() {
        let mut budget = BudgetStore::new(BudgetSavePolicy::Keep);
        budget.load(Amount::new(1000));
        budget.edit(Amount::new(5000));

        assert!(!budget.reject());
        assert_eq!(budget.value(), Amount::new(5000));
        assert_eq!(budget.confirmed(), Amount::new(1000));
    }

    #[test]
    fn confirmed_value_moves_on_success() {
        let mut budget = BudgetStore::new(BudgetSavePolicy::Revert);
        budget.edit(Amount::new(700));
        budget.confirm(Amount::new(700));
        assert!(!budget.reject());
        assert_eq!(budget.value(), Amount::new(700));
    }
}
