//! Client core of the expense tracker.
//!
//! Holds the session, the expense list, the budget and the form draft, and
//! keeps them in sync with the remote API. It never renders anything: the
//! terminal front-end drives a [`Tracker`] and runs the [`Job`]s it hands out.

mod budget;
mod client;
mod demo;
mod draft;
mod error;
mod session;
mod store;
mod summary;
mod tracker;

pub use api_types::{
    Amount,
    expense::{Expense, ExpenseId, ExpenseNew},
};
pub use budget::{BudgetSavePolicy, BudgetStore};
pub use client::Client;
pub use demo::{DEMO_BUDGET, demo_expenses};
pub use draft::{Draft, DraftField, DraftMode, MAX_AMOUNT};
pub use error::{ClientError, DraftProblem, TrackerError};
pub use session::{Session, SessionHolder, SessionState, SessionTag};
pub use store::ExpenseStore;
pub use summary::{Summary, by_category};
pub use tracker::{
    Completion, Effect, Job, Notice, NoticeLevel, Outcome, Revisions, Tracker, TrackerOptions,
};
