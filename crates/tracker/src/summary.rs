use std::collections::BTreeMap;

use api_types::{Amount, expense::Expense};

/// Totals derived from the expense list and the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total: Amount,
    pub budget: Amount,
    pub remaining: Amount,
}

impl Summary {
    pub fn compute(expenses: &[Expense], budget: Amount) -> Self {
        // Server amounts are not bounded by the form; saturate.
        let total = expenses
            .iter()
            .fold(Amount::ZERO, |acc, expense| acc.saturating_add(expense.amount));
        Self {
            count: expenses.len(),
            total,
            budget,
            remaining: budget.saturating_sub(total),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Spend per category, largest first. Uncategorised expenses share the
/// `None` bucket.
pub fn by_category(expenses: &[Expense]) -> Vec<(Option<String>, Amount)> {
    let mut buckets: BTreeMap<Option<String>, Amount> = BTreeMap::new();
    for expense in expenses {
        let key = expense
            .category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let slot = buckets.entry(key).or_default();
        *slot = slot.saturating_add(expense.amount);
    }

    let mut totals: Vec<_> = buckets.into_iter().collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

#[cfg(test)]
mod tests {
    use api_types::expense::ExpenseId;
    use chrono::NaiveDate;

    use super::*;

    fn expense(minor: i64, category: Option<&str>) -> Expense {
        Expense {
            id: ExpenseId::new(minor.to_string()),
            amount: Amount::new(minor),
            description: None,
            category: category.map(str::to_string),
            date: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn remaining_is_budget_minus_total() {
        let expenses = [expense(5000, None), expense(1250, None)];
        let summary = Summary::compute(&expenses, Amount::new(10000));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, Amount::new(6250));
        assert_eq!(summary.remaining, Amount::new(3750));
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn empty_list_leaves_whole_budget() {
        let summary = Summary::compute(&[], Amount::new(800));
        assert_eq!(summary.total, Amount::ZERO);
        assert_eq!(summary.remaining, Amount::new(800));
    }

    #[test]
    fn overspending_goes_negative() {
        let summary = Summary::compute(&[expense(3000, None)], Amount::new(1000));
        assert_eq!(summary.remaining, Amount::new(-2000));
        assert!(summary.is_over_budget());
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let expenses = [
            expense(i64::MAX / 2 + 1, Some("Dom")),
            expense(i64::MAX / 2 + 1, Some("Dom")),
        ];
        let summary = Summary::compute(&expenses, Amount::new(1000));
        assert_eq!(summary.total, Amount::new(i64::MAX));
        assert_eq!(summary.remaining, Amount::new(1000 - i64::MAX));
        assert!(summary.is_over_budget());

        let negative_budget = Summary::compute(&expenses, Amount::new(-10));
        assert_eq!(negative_budget.remaining, Amount::new(i64::MIN));

        assert_eq!(
            by_category(&expenses),
            vec![(Some("Dom".to_string()), Amount::new(i64::MAX))]
        );
    }

    #[test]
    fn groups_by_category_largest_first() {
        let expenses = [
            expense(100, Some("Transport")),
            expense(500, Some("Spożywcze")),
            expense(250, Some("Transport")),
            expense(40, Some("  ")),
            expense(60, None),
        ];
        let totals = by_category(&expenses);
        assert_eq!(
            totals,
            vec![
                (Some("Spożywcze".to_string()), Amount::new(500)),
                (Some("Transport".to_string()), Amount::new(350)),
                (None, Amount::new(100)),
            ]
        );
    }
}
