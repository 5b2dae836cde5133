#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Partial(String),
    Final(String),
}

impl SessionEvent {
    pub fn text(&self) -> &str {
        match self {
            SessionEvent::Partial(text) | SessionEvent::Final(text) => text,
        }
    }
}
