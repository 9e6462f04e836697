use api_types::expense::{Expense, ExpenseId, ExpenseNew};
use chrono::NaiveTime;

/// In-memory copy of the session's expenses, in server order.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    items: Vec<Expense>,
}

impl ExpenseStore {
    pub fn items(&self) -> &[Expense] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.items.iter().find(|expense| &expense.id == id)
    }

    /// Overwrites the collection. No merge with previous contents.
    pub fn replace_all(&mut self, items: Vec<Expense>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends a record returned by the server.
    ///
    /// A record whose id is already present replaces it in place.
    pub fn insert(&mut self, expense: Expense) {
        match self.items.iter_mut().find(|item| item.id == expense.id) {
            Some(existing) => *existing = expense,
            None => self.items.push(expense),
        }
    }

    /// Copies the submitted fields onto the record with `id`. Returns `false`
    /// if no such record is held.
    pub fn apply_update(&mut self, id: &ExpenseId, payload: &ExpenseNew) -> bool {
        let Some(expense) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        expense.amount = payload.amount;
        expense.description = payload.description.clone();
        expense.category = payload.category.clone();
        expense.date = payload.date.and_time(NaiveTime::MIN);
        true
    }

    pub fn remove(&mut self, id: &ExpenseId) -> Option<Expense> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use api_types::Amount;
    use chrono::NaiveDate;

    use super::*;

    fn expense(id: &str, minor: i64) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount: Amount::new(minor),
            description: None,
            category: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn insert_appends_in_order() {
        let mut store = ExpenseStore::default();
        store.insert(expense("1", 100));
        store.insert(expense("2", 200));
        let ids: Vec<_> = store.items().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn insert_with_known_id_replaces() {
        let mut store = ExpenseStore::default();
        store.insert(expense("1", 100));
        store.insert(expense("1", 300));
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].amount, Amount::new(300));
    }

    #[test]
    fn update_keeps_id_and_replaces_fields() {
        let mut store = ExpenseStore::default();
        store.replace_all(vec![expense("1", 100), expense("2", 200)]);
        let payload = ExpenseNew {
            amount: Amount::new(999),
            description: Some("Obiad".to_string()),
            category: Some("Jedzenie".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
        };

        assert!(store.apply_update(&ExpenseId::new("2"), &payload));
        let updated = store.get(&ExpenseId::new("2")).unwrap();
        assert_eq!(updated.amount, Amount::new(999));
        assert_eq!(updated.description.as_deref(), Some("Obiad"));
        assert_eq!(updated.day(), payload.date);
        assert_eq!(store.len(), 2);

        assert!(!store.apply_update(&ExpenseId::new("missing"), &payload));
    }

    #[test]
    fn remove_drops_exactly_one() {
        let mut store = ExpenseStore::default();
        store.replace_all(vec![expense("1", 100), expense("2", 200), expense("3", 300)]);
        let removed = store.remove(&ExpenseId::new("2")).unwrap();
        assert_eq!(removed.id.as_str(), "2");
        assert_eq!(store.len(), 2);
        assert!(store.remove(&ExpenseId::new("2")).is_none());
    }
}
