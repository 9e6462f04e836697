use std::fmt;

/// Bearer credentials obtained from `POST /login`.
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Identity of the session a request was dispatched under.
///
/// Every login/logout produces a new tag, so a response carrying an older
/// tag belongs to a session that is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTag(u64);

#[derive(Debug, Default)]
pub struct SessionHolder {
    current: Option<Session>,
    generation: u64,
}

impl SessionHolder {
    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(Session::token)
    }

    pub fn tag(&self) -> SessionTag {
        SessionTag(self.generation)
    }

    pub fn is_current(&self, tag: SessionTag) -> bool {
        self.tag() == tag
    }

    pub fn sign_in(&mut self, session: Session) -> SessionTag {
        self.current = Some(session);
        self.bump()
    }

    pub fn sign_out(&mut self) -> SessionTag {
        self.current = None;
        self.bump()
    }

    fn bump(&mut self) -> SessionTag {
        self.generation = self.generation.wrapping_add(1);
        self.tag()
    }
}
