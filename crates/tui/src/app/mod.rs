use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracker::{
    Amount, Client, Completion, DraftField, DraftMode, DraftProblem, ExpenseId, Job, MAX_AMOUNT,
    Notice, NoticeLevel, Outcome, SessionState, Tracker, TrackerError,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Tracker,
    Login,
    Register,
    Account,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tracker => "Tracker",
            Self::Login => "Logowanie",
            Self::Register => "Rejestracja",
            Self::Account => "Moje konto",
        }
    }

    /// Screens reachable in the given session state, in tab order.
    pub fn available(state: SessionState) -> &'static [Screen] {
        match state {
            SessionState::Anonymous => &[Screen::Tracker, Screen::Login, Screen::Register],
            SessionState::Authenticated => &[Screen::Tracker, Screen::Account],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginState {
    fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            password: String::new(),
            focus: LoginField::Email,
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn advance_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

/// Where keystrokes go on the tracker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerFocus {
    List,
    Form(DraftField),
    Budget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    DeleteExpense(ExpenseId),
    DeleteData,
    DeleteAccount,
}

impl Confirm {
    pub fn question(&self) -> &'static str {
        match self {
            Self::DeleteExpense(_) => "Usunąć zaznaczony wydatek?",
            Self::DeleteData => "Na pewno usunąć wszystkie wydatki?",
            Self::DeleteAccount => "Na pewno usunąć konto i wszystkie dane?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub tracker: Tracker,
    pub login: LoginState,
    pub register: LoginState,
    pub focus: TrackerFocus,
    pub selected: usize,
    pub budget_input: String,
    pub confirm: Option<Confirm>,
    pub toast: Option<ToastState>,
    /// Requests still in flight.
    pub pending: usize,
    /// Email of the logged-in user, for the info bar.
    pub user: Option<String>,
    pub base_url: String,
    pub currency: String,
}

impl AppState {
    pub fn selected_id(&self) -> Option<&ExpenseId> {
        self.tracker
            .expenses()
            .get(self.selected)
            .map(|expense| &expense.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.tracker.expenses().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.tracker.expenses().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
        }
    }
}

pub struct App {
    state: AppState,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let tracker = Tracker::new(client, config.tracker_options());
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let state = AppState {
            screen: Screen::Tracker,
            tracker,
            login: LoginState::new(&config.email),
            register: LoginState::new(""),
            focus: TrackerFocus::List,
            selected: 0,
            budget_input: String::new(),
            confirm: None,
            toast: None,
            pending: 0,
            user: None,
            base_url: config.base_url.clone(),
            currency: config.currency.clone(),
        };

        Ok(Self {
            state,
            completions_tx,
            completions_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }

            while let Ok(completion) = self.completions_rx.try_recv() {
                self.on_completion(completion);
            }
            self.state.expire_toast(Instant::now());

            // Let spawned requests make progress between frames.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn dispatch(&mut self, job: Job) {
        tracing::debug!(job = job.name(), "spawning request");
        self.state.pending += 1;
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let completion = job.run().await;
            if tx.send(completion).is_err() {
                tracing::debug!("ui gone, dropping completion");
            }
        });
    }

    fn on_completion(&mut self, completion: Completion) {
        self.state.pending = self.state.pending.saturating_sub(1);
        let registered = matches!(completion.outcome, Outcome::Registered(Ok(())));
        let before = self.state.tracker.session_state();

        let effect = self.state.tracker.apply(completion);
        let stale = effect.stale;
        if let Some(notice) = effect.notice {
            self.show_notice(notice);
        }
        if let Some(job) = effect.follow_up {
            self.dispatch(job);
        }

        let after = self.state.tracker.session_state();
        if before != after {
            self.on_session_changed(after);
        }
        if registered && !stale {
            self.state.login.email = self.state.register.email.clone();
            self.state.login.password.clear();
            self.state.register.password.clear();
            self.state.screen = Screen::Login;
        }
        self.state.clamp_selection();
    }

    fn on_session_changed(&mut self, state: SessionState) {
        match state {
            SessionState::Authenticated => {
                self.state.user = Some(self.state.login.email.trim().to_string());
                self.state.login.password.clear();
            }
            SessionState::Anonymous => {
                self.state.user = None;
            }
        }
        self.state.screen = Screen::Tracker;
        self.state.focus = TrackerFocus::List;
        self.state.confirm = None;
        self.state.selected = 0;
    }

    fn show_notice(&mut self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Info => ToastLevel::Info,
            NoticeLevel::Success => ToastLevel::Success,
            NoticeLevel::Error => ToastLevel::Error,
        };
        self.state.notify(level, notice.message);
    }

    fn refuse(&mut self, err: TrackerError) {
        tracing::debug!("action refused: {err}");
        self.state
            .notify(ToastLevel::Error, message_for_tracker_error(&err));
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.confirm.is_some() {
            self.handle_confirm(action);
            return;
        }

        match self.state.screen {
            Screen::Tracker => self.handle_tracker_key(action),
            Screen::Login | Screen::Register => self.handle_credentials_key(action),
            Screen::Account => self.handle_account_key(action),
        }
    }

    fn handle_confirm(&mut self, action: AppAction) {
        match action {
            AppAction::Input('y' | 'Y' | 't' | 'T') | AppAction::Submit => {
                if let Some(confirm) = self.state.confirm.take() {
                    self.confirmed(confirm);
                }
            }
            AppAction::Input('n' | 'N') | AppAction::Cancel => {
                self.state.confirm = None;
            }
            _ => {}
        }
    }

    fn confirmed(&mut self, confirm: Confirm) {
        let job = match confirm {
            Confirm::DeleteExpense(id) => self.state.tracker.remove(&id),
            Confirm::DeleteData => self.state.tracker.delete_data(),
            Confirm::DeleteAccount => self.state.tracker.delete_account(),
        };
        match job {
            Ok(job) => self.dispatch(job),
            Err(err) => self.refuse(err),
        }
    }

    /// Keys shared by every screen that is not capturing text.
    fn handle_navigation(&mut self, ch: char) -> bool {
        let authenticated = self.state.tracker.is_authenticated();
        match ch {
            'q' | 'Q' => self.should_quit = true,
            'h' | 'H' => self.state.screen = Screen::Tracker,
            'l' | 'L' if !authenticated => self.state.screen = Screen::Login,
            'g' | 'G' if !authenticated => self.state.screen = Screen::Register,
            'm' | 'M' if authenticated => self.state.screen = Screen::Account,
            'o' | 'O' if authenticated => {
                self.state.tracker.logout();
                self.on_session_changed(SessionState::Anonymous);
                self.state.notify(ToastLevel::Info, "Wylogowano");
            }
            _ => return false,
        }
        true
    }

    fn handle_tracker_key(&mut self, action: AppAction) {
        match self.state.focus {
            TrackerFocus::List => self.handle_list_key(action),
            TrackerFocus::Form(field) => self.handle_form_key(field, action),
            TrackerFocus::Budget => self.handle_budget_key(action),
        }
    }

    fn handle_list_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up => self.state.select_prev(),
            AppAction::Down => self.state.select_next(),
            AppAction::Submit => self.start_edit(),
            AppAction::NextField => self.start_draft(),
            AppAction::Input(ch) => {
                if self.handle_navigation(ch) {
                    return;
                }
                match ch {
                    'j' => self.state.select_next(),
                    'k' => self.state.select_prev(),
                    'a' | 'A' => self.start_draft(),
                    'e' | 'E' => self.start_edit(),
                    'd' | 'D' => self.ask_delete_selected(),
                    'b' | 'B' => self.start_budget_edit(),
                    'r' | 'R' => self.reload(),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn start_draft(&mut self) {
        if !self.state.tracker.is_authenticated() {
            self.refuse(TrackerError::NotAuthenticated);
            return;
        }
        if self.state.tracker.draft().mode() == &DraftMode::Idle {
            let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
            if let Err(err) = self
                .state
                .tracker
                .draft_mut()
                .set(DraftField::Date, &today)
            {
                self.refuse(err);
                return;
            }
        }
        self.state.focus = TrackerFocus::Form(DraftField::Amount);
    }

    fn start_edit(&mut self) {
        let Some(id) = self.state.selected_id().cloned() else {
            return;
        };
        match self.state.tracker.begin_edit(&id) {
            Ok(()) => self.state.focus = TrackerFocus::Form(DraftField::Amount),
            Err(err) => self.refuse(err),
        }
    }

    fn ask_delete_selected(&mut self) {
        if !self.state.tracker.is_authenticated() {
            self.refuse(TrackerError::NotAuthenticated);
            return;
        }
        if let Some(id) = self.state.selected_id().cloned() {
            self.state.confirm = Some(Confirm::DeleteExpense(id));
        }
    }

    fn start_budget_edit(&mut self) {
        if !self.state.tracker.is_authenticated() {
            self.refuse(TrackerError::NotAuthenticated);
            return;
        }
        self.state.budget_input = self.state.tracker.budget().to_string();
        self.state.focus = TrackerFocus::Budget;
    }

    fn reload(&mut self) {
        if let Some(job) = self.state.tracker.reload() {
            self.dispatch(job);
        }
        self.state.clamp_selection();
    }

    fn handle_form_key(&mut self, field: DraftField, action: AppAction) {
        let result = match action {
            AppAction::Input(ch) => self.state.tracker.draft_mut().push(field, ch),
            AppAction::Backspace => self.state.tracker.draft_mut().pop(field),
            AppAction::NextField => {
                self.state.focus = TrackerFocus::Form(field.next());
                Ok(())
            }
            AppAction::Up | AppAction::Down => {
                self.state.focus = TrackerFocus::List;
                Ok(())
            }
            AppAction::Cancel => {
                let result = self.state.tracker.cancel_draft();
                if result.is_ok() {
                    self.state.focus = TrackerFocus::List;
                }
                result
            }
            AppAction::Submit => match self.state.tracker.submit() {
                Ok(job) => {
                    self.dispatch(job);
                    self.state.focus = TrackerFocus::List;
                    Ok(())
                }
                Err(err) => Err(err),
            },
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.refuse(err);
        }
    }

    fn handle_budget_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.budget_input.push(ch),
            AppAction::Backspace => {
                self.state.budget_input.pop();
            }
            AppAction::Cancel => {
                self.state.budget_input.clear();
                self.state.focus = TrackerFocus::List;
            }
            // Leaving the field commits it.
            AppAction::Submit | AppAction::NextField | AppAction::Up | AppAction::Down => {
                self.state.focus = TrackerFocus::List;
                self.commit_budget();
            }
            _ => {}
        }
    }

    fn commit_budget(&mut self) {
        let input = std::mem::take(&mut self.state.budget_input);
        let value = match input.parse::<Amount>() {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("rejected budget input {input:?}: {err}");
                self.state
                    .notify(ToastLevel::Error, "Nieprawidłowa kwota budżetu.");
                return;
            }
        };
        if value == self.state.tracker.budget() {
            return;
        }
        match self.state.tracker.save_budget(value) {
            Ok(job) => self.dispatch(job),
            Err(err) => self.refuse(err),
        }
    }

    fn handle_credentials_key(&mut self, action: AppAction) {
        let registering = self.state.screen == Screen::Register;
        let form = if registering {
            &mut self.state.register
        } else {
            &mut self.state.login
        };

        match action {
            AppAction::NextField | AppAction::Up | AppAction::Down => form.advance_focus(),
            AppAction::Backspace => {
                form.active_field_mut().pop();
            }
            AppAction::Input(ch) => form.active_field_mut().push(ch),
            AppAction::Cancel => self.state.screen = Screen::Tracker,
            AppAction::Submit => {
                let job = if registering {
                    let form = &self.state.register;
                    self.state.tracker.register(&form.email, &form.password)
                } else {
                    let form = &self.state.login;
                    self.state.tracker.login(&form.email, &form.password)
                };
                match job {
                    Ok(job) => self.dispatch(job),
                    Err(err) => self.refuse(err),
                }
            }
            _ => {}
        }
    }

    fn handle_account_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.screen = Screen::Tracker,
            AppAction::Input(ch) => {
                if self.handle_navigation(ch) {
                    return;
                }
                match ch {
                    'd' | 'D' => self.state.confirm = Some(Confirm::DeleteData),
                    'x' | 'X' => self.state.confirm = Some(Confirm::DeleteAccount),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn message_for_tracker_error(err: &TrackerError) -> String {
    match err {
        TrackerError::NotAuthenticated => "Zaloguj się, aby edytować dane.".to_string(),
        TrackerError::AlreadyAuthenticated => "Jesteś już zalogowany.".to_string(),
        TrackerError::MissingCredentials => "Podaj email i hasło.".to_string(),
        TrackerError::EmptyDraft => "Formularz jest pusty.".to_string(),
        TrackerError::DraftLocked => "Trwa zapisywanie, poczekaj chwilę.".to_string(),
        TrackerError::InvalidDraft(problem) => match problem {
            DraftProblem::MissingAmount => "Podaj kwotę.".to_string(),
            DraftProblem::BadAmount => "Kwota musi być liczbą (maks. 2 miejsca po przecinku)."
                .to_string(),
            DraftProblem::NegativeAmount => "Kwota nie może być ujemna.".to_string(),
            DraftProblem::TooLarge => format!("Kwota nie może przekraczać {MAX_AMOUNT}."),
            DraftProblem::MissingDate => "Podaj datę.".to_string(),
            DraftProblem::BadDate => "Data musi mieć format RRRR-MM-DD.".to_string(),
        },
        TrackerError::InvalidBudget => "Budżet nie może być ujemny.".to_string(),
        TrackerError::UnknownExpense(id) => format!("Wydatek {id} nie istnieje."),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use tracker::{DEMO_BUDGET, SessionTag};

    use super::*;

    fn app() -> App {
        let config = AppConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            email: "ala@example.pl".to_string(),
            ..AppConfig::default()
        };
        App::new(config).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn sign_in(app: &mut App) -> SessionTag {
        let tag = app.state.tracker.session_tag();
        app.state.pending += 1;
        app.on_completion(Completion {
            tag,
            outcome: Outcome::LoggedIn(Ok("t0k3n".to_string())),
        });
        app.state.tracker.session_tag()
    }

    #[test]
    fn starts_on_tracker_with_demo_data() {
        let app = app();
        assert_eq!(app.state.screen, Screen::Tracker);
        assert_eq!(app.state.tracker.budget(), DEMO_BUDGET);
        assert_eq!(app.state.login.email, "ala@example.pl");
    }

    #[test]
    fn anonymous_edit_is_refused_with_toast() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state.focus, TrackerFocus::List);
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Zaloguj się, aby edytować dane.");
    }

    #[test]
    fn anonymous_delete_and_budget_are_refused() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.state.confirm.is_none());
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.state.focus, TrackerFocus::List);
    }

    #[test]
    fn q_is_text_on_the_login_screen() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state.screen, Screen::Login);

        app.state.login.email.clear();
        type_text(&mut app, "qq@x.pl");
        assert!(!app.should_quit);
        assert_eq!(app.state.login.email, "qq@x.pl");

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        assert_eq!(app.state.login.password, "pw");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.screen, Screen::Tracker);
    }

    #[test]
    fn empty_login_is_refused_locally() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.pending, 0);
        assert_eq!(
            app.state.toast.as_ref().unwrap().message,
            "Podaj email i hasło."
        );
    }

    #[test]
    fn login_completion_switches_to_tracker() {
        let mut app = app();
        app.state.screen = Screen::Login;
        app.state.login.password = "secret".to_string();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        sign_in(&mut app);

        assert_eq!(app.state.screen, Screen::Tracker);
        assert_eq!(app.state.user.as_deref(), Some("ala@example.pl"));
        assert!(app.state.login.password.is_empty());
        // The follow-up load is in flight.
        assert_eq!(app.state.pending, 1);
    }

    #[test]
    fn registration_moves_to_login_with_email() {
        let mut app = app();
        app.state.screen = Screen::Register;
        app.state.register.email = "nowy@example.pl".to_string();
        app.state.register.password = "haslo".to_string();

        let tag = app.state.tracker.session_tag();
        app.on_completion(Completion {
            tag,
            outcome: Outcome::Registered(Ok(())),
        });
        assert_eq!(app.state.screen, Screen::Login);
        assert_eq!(app.state.login.email, "nowy@example.pl");
        assert!(app.state.register.password.is_empty());
    }

    #[test]
    fn late_registration_after_login_is_ignored() {
        let mut app = app();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        let anonymous_tag = app.state.tracker.session_tag();
        sign_in(&mut app);

        app.on_completion(Completion {
            tag: anonymous_tag,
            outcome: Outcome::Registered(Ok(())),
        });
        assert_eq!(app.state.screen, Screen::Tracker);
        assert_eq!(app.state.tracker.session_state(), SessionState::Authenticated);
        assert_eq!(app.state.user.as_deref(), Some("ala@example.pl"));
    }

    #[test]
    fn form_typing_and_cancel() {
        let mut app = app();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        sign_in(&mut app);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state.focus, TrackerFocus::Form(DraftField::Amount));
        assert_eq!(app.state.tracker.draft().mode(), &DraftMode::Creating);
        assert_eq!(
            app.state.tracker.draft().value(DraftField::Date).len(),
            "2025-06-01".len()
        );

        type_text(&mut app, "12,5");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Obiad");
        assert_eq!(app.state.tracker.draft().value(DraftField::Amount), "12,5");
        assert_eq!(
            app.state.tracker.draft().value(DraftField::Description),
            "Obiad"
        );

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.focus, TrackerFocus::List);
        assert_eq!(app.state.tracker.draft().mode(), &DraftMode::Idle);
    }

    #[test]
    fn bad_budget_input_is_not_sent() {
        let mut app = app();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        sign_in(&mut app);
        let pending = app.state.pending;

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.state.focus, TrackerFocus::Budget);
        app.state.budget_input.clear();
        type_text(&mut app, "dużo");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.focus, TrackerFocus::List);
        assert_eq!(app.state.pending, pending);
        assert_eq!(
            app.state.toast.as_ref().unwrap().message,
            "Nieprawidłowa kwota budżetu."
        );
    }

    #[test]
    fn logout_returns_to_demo() {
        let mut app = app();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        sign_in(&mut app);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.state.tracker.session_state(), SessionState::Anonymous);
        assert_eq!(app.state.tracker.budget(), DEMO_BUDGET);
        assert!(app.state.user.is_none());
    }

    #[test]
    fn confirmation_can_be_declined() {
        let mut app = app();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        sign_in(&mut app);
        app.state.screen = Screen::Account;

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state.confirm, Some(Confirm::DeleteAccount));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.state.confirm.is_none());
        assert_eq!(app.state.tracker.session_state(), SessionState::Authenticated);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app();
        let len = app.state.tracker.expenses().len();
        for _ in 0..len + 3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.state.selected, len - 1);
        for _ in 0..len + 3 {
            press(&mut app, KeyCode::Char('k'));
        }
        assert_eq!(app.state.selected, 0);
    }

    fn rendered(app: &App) -> String {
        let backend = ratatui::backend::TestBackend::new(110, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| ui::render(frame, &app.state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_demo_tracker_and_forms() {
        let mut app = app();
        let screen = rendered(&app);
        assert!(screen.contains("Wydatki (demo)"));
        assert!(screen.contains("Rachunek za prąd"));
        assert!(screen.contains("2000.00 PLN"));

        app.state.screen = Screen::Login;
        assert!(rendered(&app).contains("Logowanie"));
        app.state.screen = Screen::Register;
        assert!(rendered(&app).contains("Rejestracja"));
    }

    #[test]
    fn renders_confirmation_over_account_screen() {
        let mut app = app();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        sign_in(&mut app);

        app.state.screen = Screen::Account;
        let screen = rendered(&app);
        assert!(screen.contains("usuń wszystkie wydatki"));
        assert!(!screen.contains("wydatki i budżet"));

        app.state.confirm = Some(Confirm::DeleteData);
        let screen = rendered(&app);
        assert!(screen.contains("Moje konto"));
        assert!(screen.contains("Potwierdź"));
    }

    #[test]
    fn toast_expires() {
        let mut app = app();
        app.state.notify(ToastLevel::Info, "hej");
        app.state.expire_toast(Instant::now());
        assert!(app.state.toast.is_some());
        app.state.expire_toast(Instant::now() + TOAST_TTL + Duration::from_millis(1));
        assert!(app.state.toast.is_none());
    }
}
