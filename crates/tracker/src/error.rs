use api_types::expense::ExpenseId;
use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Why a draft cannot be turned into a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftProblem {
    #[error("amount is required")]
    MissingAmount,
    #[error("amount is not a number")]
    BadAmount,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("amount is too large")]
    TooLarge,
    #[error("date is required")]
    MissingDate,
    #[error("date must be YYYY-MM-DD")]
    BadDate,
}

/// Local refusal of an action, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("login required")]
    NotAuthenticated,
    #[error("already logged in")]
    AlreadyAuthenticated,
    #[error("email and password are required")]
    MissingCredentials,
    #[error("nothing to submit")]
    EmptyDraft,
    #[error("a submit is already in progress")]
    DraftLocked,
    #[error("invalid draft: {0}")]
    InvalidDraft(DraftProblem),
    #[error("invalid budget")]
    InvalidBudget,
    #[error("unknown expense: {0}")]
    UnknownExpense(ExpenseId),
}
