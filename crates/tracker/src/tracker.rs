use api_types::{
    Amount,
    auth::Credentials,
    expense::{Expense, ExpenseId, ExpenseNew},
};

use crate::{
    budget::{BudgetSavePolicy, BudgetStore},
    client::Client,
    demo,
    draft::{Draft, DraftMode},
    error::{ClientError, TrackerError},
    session::{Session, SessionHolder, SessionState, SessionTag},
    store::ExpenseStore,
    summary::Summary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// User-facing message produced by a completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TrackerOptions {
    pub budget_policy: BudgetSavePolicy,
}

/// Counts local commits to the list and to the budget. A load carries the
/// counts seen at dispatch and only overwrites a part that has not moved since.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Revisions {
    list: u64,
    budget: u64,
}

#[derive(Debug, Clone)]
enum Action {
    Login(Credentials),
    Register(Credentials),
    Load {
        token: String,
        seen: Revisions,
    },
    Create {
        token: String,
        payload: ExpenseNew,
    },
    Update {
        token: String,
        id: ExpenseId,
        payload: ExpenseNew,
    },
    Remove {
        token: String,
        id: ExpenseId,
    },
    SaveBudget {
        token: String,
        value: Amount,
    },
    DeleteData {
        token: String,
    },
    DeleteAccount {
        token: String,
    },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Load { .. } => "load",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::SaveBudget { .. } => "save_budget",
            Self::DeleteData { .. } => "delete_data",
            Self::DeleteAccount { .. } => "delete_account",
        }
    }
}

/// One remote call, tagged with the session it was dispatched under.
///
/// Owns everything it needs, so it can be awaited inline or spawned.
#[derive(Debug)]
pub struct Job {
    tag: SessionTag,
    client: Client,
    action: Action,
}

impl Job {
    pub fn tag(&self) -> SessionTag {
        self.tag
    }

    pub fn name(&self) -> &'static str {
        self.action.name()
    }

    pub async fn run(self) -> Completion {
        let Self {
            tag,
            client,
            action,
        } = self;

        let outcome = match action {
            Action::Login(credentials) => Outcome::LoggedIn(client.login(&credentials).await),
            Action::Register(credentials) => {
                Outcome::Registered(client.register(&credentials).await)
            }
            Action::Load { token, seen } => {
                let (expenses, budget) = tokio::join!(
                    client.expenses_list(Some(&token)),
                    client.budget_get(&token)
                );
                Outcome::Loaded {
                    expenses,
                    budget,
                    seen,
                }
            }
            Action::Create { token, payload } => {
                Outcome::Created(client.expense_create(&token, &payload).await)
            }
            Action::Update { token, id, payload } => {
                let result = client.expense_update(&token, &id, &payload).await;
                Outcome::Updated {
                    id,
                    payload,
                    result,
                }
            }
            Action::Remove { token, id } => {
                let result = client.expense_delete(&token, &id).await;
                Outcome::Removed { id, result }
            }
            Action::SaveBudget { token, value } => {
                let result = client.budget_set(&token, value).await;
                Outcome::BudgetSaved { value, result }
            }
            Action::DeleteData { token } => {
                Outcome::DataDeleted(client.delete_all_expenses(&token).await)
            }
            Action::DeleteAccount { token } => {
                Outcome::AccountDeleted(client.delete_account(&token).await)
            }
        };

        Completion { tag, outcome }
    }
}

#[derive(Debug)]
pub enum Outcome {
    LoggedIn(Result<String, ClientError>),
    Registered(Result<(), ClientError>),
    Loaded {
        expenses: Result<Vec<Expense>, ClientError>,
        budget: Result<Amount, ClientError>,
        seen: Revisions,
    },
    Created(Result<Expense, ClientError>),
    Updated {
        id: ExpenseId,
        payload: ExpenseNew,
        result: Result<(), ClientError>,
    },
    Removed {
        id: ExpenseId,
        result: Result<(), ClientError>,
    },
    BudgetSaved {
        value: Amount,
        result: Result<(), ClientError>,
    },
    DataDeleted(Result<(), ClientError>),
    AccountDeleted(Result<(), ClientError>),
}

/// Result of a [`Job`], still carrying the dispatch-time session tag.
#[derive(Debug)]
pub struct Completion {
    pub tag: SessionTag,
    pub outcome: Outcome,
}

/// What the front-end should do after [`Tracker::apply`].
#[derive(Debug, Default)]
pub struct Effect {
    pub notice: Option<Notice>,
    pub follow_up: Option<Job>,
    /// The completion belonged to a session that is no longer active.
    pub stale: bool,
}

impl Effect {
    fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    fn stale() -> Self {
        Self {
            stale: true,
            ..Self::default()
        }
    }
}

/// Client-side state of the expense tracker.
///
/// Actions return a [`Job`] instead of calling the API; the caller runs it
/// and hands the [`Completion`] back to [`Tracker::apply`], which commits it
/// only if the session it was dispatched under is still active.
#[derive(Debug)]
pub struct Tracker {
    client: Client,
    session: SessionHolder,
    expenses: ExpenseStore,
    budget: BudgetStore,
    draft: Draft,
    revisions: Revisions,
}

impl Tracker {
    /// Starts anonymous, showing the demo data.
    pub fn new(client: Client, options: TrackerOptions) -> Self {
        let mut tracker = Self {
            client,
            session: SessionHolder::default(),
            expenses: ExpenseStore::default(),
            budget: BudgetStore::new(options.budget_policy),
            draft: Draft::default(),
            revisions: Revisions::default(),
        };
        tracker.show_demo();
        tracker
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session_tag(&self) -> SessionTag {
        self.session.tag()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn expenses(&self) -> &[Expense] {
        self.expenses.items()
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.get(id)
    }

    pub fn budget(&self) -> Amount {
        self.budget.value()
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(self.expenses.items(), self.budget.value())
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Job, TrackerError> {
        if self.session.is_authenticated() {
            return Err(TrackerError::AlreadyAuthenticated);
        }
        let credentials = credentials(email, password)?;
        Ok(self.job(Action::Login(credentials)))
    }

    pub fn register(&self, email: &str, password: &str) -> Result<Job, TrackerError> {
        if self.session.is_authenticated() {
            return Err(TrackerError::AlreadyAuthenticated);
        }
        let credentials = credentials(email, password)?;
        Ok(self.job(Action::Register(credentials)))
    }

    /// Ends the session locally and shows the demo data again. Server data is
    /// untouched.
    pub fn logout(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        self.session.sign_out();
        tracing::info!("logged out");
        self.show_demo();
    }

    /// Refreshes expenses and budget for the current session. Anonymous
    /// sessions get the demo data immediately and no job.
    pub fn reload(&mut self) -> Option<Job> {
        match self.session.token() {
            Some(token) => {
                let action = Action::Load {
                    token: token.to_string(),
                    seen: self.revisions,
                };
                Some(self.job(action))
            }
            None => {
                self.show_demo();
                None
            }
        }
    }

    pub fn begin_edit(&mut self, id: &ExpenseId) -> Result<(), TrackerError> {
        self.require_session()?;
        let expense = self
            .expenses
            .get(id)
            .ok_or_else(|| TrackerError::UnknownExpense(id.clone()))?;
        self.draft.begin_edit(expense)
    }

    pub fn cancel_draft(&mut self) -> Result<(), TrackerError> {
        self.draft.cancel()
    }

    /// Sends the draft: create while `Creating`, update while `Editing`.
    pub fn submit(&mut self) -> Result<Job, TrackerError> {
        let token = self.require_session()?.to_string();
        if self.draft.is_locked() {
            return Err(TrackerError::DraftLocked);
        }
        let action = match self.draft.mode() {
            DraftMode::Idle => return Err(TrackerError::EmptyDraft),
            DraftMode::Creating => Action::Create {
                token,
                payload: self.draft.payload()?,
            },
            DraftMode::Editing(id) => Action::Update {
                token,
                id: id.clone(),
                payload: self.draft.payload()?,
            },
        };
        self.draft.lock();
        Ok(self.job(action))
    }

    pub fn remove(&self, id: &ExpenseId) -> Result<Job, TrackerError> {
        let token = self.require_session()?.to_string();
        if self.expenses.get(id).is_none() {
            return Err(TrackerError::UnknownExpense(id.clone()));
        }
        Ok(self.job(Action::Remove {
            token,
            id: id.clone(),
        }))
    }

    /// Shows `value` immediately and pushes it to the server.
    pub fn save_budget(&mut self, value: Amount) -> Result<Job, TrackerError> {
        let token = self.require_session()?.to_string();
        if value.is_negative() {
            return Err(TrackerError::InvalidBudget);
        }
        self.budget.edit(value);
        self.revisions.budget += 1;
        Ok(self.job(Action::SaveBudget { token, value }))
    }

    pub fn delete_data(&self) -> Result<Job, TrackerError> {
        let token = self.require_session()?.to_string();
        Ok(self.job(Action::DeleteData { token }))
    }

    pub fn delete_account(&self) -> Result<Job, TrackerError> {
        let token = self.require_session()?.to_string();
        Ok(self.job(Action::DeleteAccount { token }))
    }

    /// Commits a completed job, unless its session has ended meanwhile.
    pub fn apply(&mut self, completion: Completion) -> Effect {
        let Completion { tag, outcome } = completion;
        if !self.session.is_current(tag) {
            tracing::debug!(?tag, current = ?self.session.tag(), "discarding stale completion");
            return Effect::stale();
        }

        match outcome {
            Outcome::LoggedIn(result) => self.on_logged_in(result),
            Outcome::Registered(result) => on_registered(result),
            Outcome::Loaded {
                expenses,
                budget,
                seen,
            } => self.on_loaded(expenses, budget, seen),
            Outcome::Created(result) => self.on_created(result),
            Outcome::Updated {
                id,
                payload,
                result,
            } => self.on_updated(&id, &payload, result),
            Outcome::Removed { id, result } => self.on_removed(&id, result),
            Outcome::BudgetSaved { value, result } => self.on_budget_saved(value, result),
            Outcome::DataDeleted(result) => self.on_data_deleted(result),
            Outcome::AccountDeleted(result) => self.on_account_deleted(result),
        }
    }

    fn on_logged_in(&mut self, result: Result<String, ClientError>) -> Effect {
        match result {
            Ok(token) => {
                self.session.sign_in(Session::new(token));
                tracing::info!("logged in");
                self.expenses.clear();
                self.budget.load(Amount::ZERO);
                self.draft.reset();
                Effect {
                    notice: Some(Notice::success("Zalogowano")),
                    follow_up: self.reload(),
                    stale: false,
                }
            }
            Err(err) => {
                tracing::warn!("login failed: {err}");
                let message = match err {
                    ClientError::Unauthorized
                    | ClientError::Forbidden
                    | ClientError::NotFound
                    | ClientError::Validation(_) => "Błędne dane logowania".to_string(),
                    other => failure_message("Logowanie nie powiodło się", &other),
                };
                Effect::notice(Notice::error(message))
            }
        }
    }

    fn on_loaded(
        &mut self,
        expenses: Result<Vec<Expense>, ClientError>,
        budget: Result<Amount, ClientError>,
        seen: Revisions,
    ) -> Effect {
        if seen.budget != self.revisions.budget {
            tracing::debug!("budget changed locally since load was sent, keeping it");
        } else {
            match budget {
                Ok(value) => self.budget.load(value),
                Err(err) => {
                    tracing::warn!("budget fetch failed, using zero: {err}");
                    self.budget.load(Amount::ZERO);
                }
            }
        }

        match expenses {
            Ok(_) if seen.list != self.revisions.list => {
                tracing::debug!("expenses changed locally since load was sent, keeping them");
                Effect::default()
            }
            Ok(items) => {
                tracing::info!(count = items.len(), "expenses loaded");
                self.expenses.replace_all(items);
                Effect::default()
            }
            Err(err) => {
                tracing::warn!("expense fetch failed: {err}");
                Effect::notice(Notice::error(failure_message(
                    "Błąd podczas pobierania wydatków",
                    &err,
                )))
            }
        }
    }

    fn on_created(&mut self, result: Result<Expense, ClientError>) -> Effect {
        match result {
            Ok(expense) => {
                tracing::info!(id = %expense.id, "expense created");
                self.expenses.insert(expense);
                self.revisions.list += 1;
                if self.draft.mode() == &DraftMode::Creating {
                    self.draft.reset();
                } else {
                    self.draft.unlock();
                }
                Effect::notice(Notice::success("Dodano wydatek"))
            }
            Err(err) => {
                tracing::warn!("create failed: {err}");
                self.draft.unlock();
                Effect::notice(Notice::error(failure_message(
                    "Błąd przy dodawaniu wydatku",
                    &err,
                )))
            }
        }
    }

    fn on_updated(
        &mut self,
        id: &ExpenseId,
        payload: &ExpenseNew,
        result: Result<(), ClientError>,
    ) -> Effect {
        match result {
            Ok(()) => {
                tracing::info!(%id, "expense updated");
                if self.expenses.apply_update(id, payload) {
                    self.revisions.list += 1;
                } else {
                    tracing::debug!(%id, "updated expense no longer held locally");
                }
                if self.draft.editing_id() == Some(id) {
                    self.draft.reset();
                } else {
                    self.draft.unlock();
                }
                Effect::notice(Notice::success("Zapisano zmiany"))
            }
            Err(err) => {
                tracing::warn!(%id, "update failed: {err}");
                self.draft.unlock();
                Effect::notice(Notice::error(failure_message(
                    "Błąd przy edycji wydatku",
                    &err,
                )))
            }
        }
    }

    fn on_removed(&mut self, id: &ExpenseId, result: Result<(), ClientError>) -> Effect {
        match result {
            Ok(()) => {
                tracing::info!(%id, "expense removed");
                self.expenses.remove(id);
                self.revisions.list += 1;
                if self.draft.editing_id() == Some(id) && !self.draft.is_locked() {
                    self.draft.reset();
                }
                Effect::notice(Notice::success("Usunięto wydatek"))
            }
            Err(err) => {
                tracing::warn!(%id, "remove failed: {err}");
                Effect::notice(Notice::error(failure_message(
                    "Błąd przy usuwaniu wydatku",
                    &err,
                )))
            }
        }
    }

    fn on_budget_saved(&mut self, value: Amount, result: Result<(), ClientError>) -> Effect {
        self.revisions.budget += 1;
        match result {
            Ok(()) => {
                tracing::info!(%value, "budget saved");
                self.budget.confirm(value);
                Effect::notice(Notice::success("Zapisano budżet"))
            }
            Err(err) => {
                tracing::warn!(%value, "budget save failed: {err}");
                if self.budget.reject() {
                    tracing::debug!(restored = %self.budget.value(), "budget display reverted");
                }
                Effect::notice(Notice::error(failure_message(
                    "Błąd przy zapisie budżetu",
                    &err,
                )))
            }
        }
    }

    fn on_data_deleted(&mut self, result: Result<(), ClientError>) -> Effect {
        match result {
            Ok(()) => {
                tracing::info!("all expenses deleted");
                self.expenses.clear();
                self.revisions.list += 1;
                if !self.draft.is_locked() {
                    self.draft.reset();
                }
                Effect::notice(Notice::success("Usunięto wszystkie wydatki"))
            }
            Err(err) => {
                tracing::warn!("delete data failed: {err}");
                Effect::notice(Notice::error(failure_message(
                    "Błąd przy usuwaniu danych",
                    &err,
                )))
            }
        }
    }

    fn on_account_deleted(&mut self, result: Result<(), ClientError>) -> Effect {
        match result {
            Ok(()) => {
                tracing::info!("account deleted");
                self.session.sign_out();
                self.show_demo();
                Effect::notice(Notice::info("Konto zostało usunięte"))
            }
            Err(err) => {
                tracing::warn!("delete account failed: {err}");
                Effect::notice(Notice::error(failure_message(
                    "Błąd przy usuwaniu konta",
                    &err,
                )))
            }
        }
    }

    fn show_demo(&mut self) {
        self.expenses.replace_all(demo::demo_expenses());
        self.budget.load(demo::DEMO_BUDGET);
        self.draft.reset();
    }

    fn require_session(&self) -> Result<&str, TrackerError> {
        self.session.token().ok_or(TrackerError::NotAuthenticated)
    }

    fn job(&self, action: Action) -> Job {
        tracing::info!(action = action.name(), "dispatching request");
        Job {
            tag: self.session.tag(),
            client: self.client.clone(),
            action,
        }
    }
}

fn on_registered(result: Result<(), ClientError>) -> Effect {
    match result {
        Ok(()) => {
            tracing::info!("account registered");
            Effect::notice(Notice::success(
                "Zarejestrowano! Możesz się teraz zalogować.",
            ))
        }
        Err(ClientError::Conflict(_)) => Effect::notice(Notice::error("Email już istnieje")),
        Err(err) => {
            tracing::warn!("register failed: {err}");
            Effect::notice(Notice::error(failure_message(
                "Rejestracja nie powiodła się",
                &err,
            )))
        }
    }
}

fn credentials(email: &str, password: &str) -> Result<Credentials, TrackerError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(TrackerError::MissingCredentials);
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn failure_message(context: &str, err: &ClientError) -> String {
    let reason = match err {
        ClientError::Unauthorized => "sesja wygasła".to_string(),
        ClientError::Forbidden => "brak uprawnień".to_string(),
        ClientError::NotFound => "nie znaleziono".to_string(),
        ClientError::Conflict(message)
        | ClientError::Validation(message)
        | ClientError::Server(message)
        | ClientError::InvalidUrl(message) => message.clone(),
        ClientError::Transport(_) => "serwer nieosiągalny".to_string(),
    };
    format!("{context}: {reason}")
}
