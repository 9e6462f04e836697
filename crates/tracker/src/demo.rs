use api_types::{
    Amount,
    expense::{Expense, ExpenseId},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Budget shown to anonymous users.
pub const DEMO_BUDGET: Amount = Amount::new(2_000_00);

/// Fixed expense set shown to anonymous users. Never sent anywhere.
pub fn demo_expenses() -> Vec<Expense> {
    vec![
        demo("demo-1", 50_00, "Zakupy", "Spożywcze", (2025, 6, 1)),
        demo("demo-2", 120_00, "Bilet miesięczny", "Transport", (2025, 6, 3)),
        demo("demo-3", 45_99, "Kino", "Rozrywka", (2025, 6, 7)),
        demo("demo-4", 310_50, "Rachunek za prąd", "Rachunki", (2025, 6, 10)),
    ]
}

fn demo(
    id: &str,
    minor: i64,
    description: &str,
    category: &str,
    (year, month, day): (i32, u32, u32),
) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        amount: Amount::new(minor),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        date: at_midnight(year, month, day),
    }
}

fn at_midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}
