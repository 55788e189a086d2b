//! Success / error notification dialog state.
//!
//! Controllers decide the outcome and the text; the surface only holds what is
//! currently shown. There is no queue: showing a notification while one is open
//! replaces its title and message.

/// Mutating or loading action a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Load => "loaded",
            Action::Create => "added",
            Action::Update => "edited",
            Action::Delete => "deleted",
        }
    }

    pub fn gerund(&self) -> &'static str {
        match self {
            Action::Load => "loading",
            Action::Create => "adding",
            Action::Update => "editing",
            Action::Delete => "deleting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    pub fn title(&self) -> &'static str {
        match self {
            Tone::Success => "Success",
            Tone::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub tone: Tone,
    pub title: String,
    pub message: String,
}

/// Modal dialog with a single dismiss action.
#[derive(Debug, Default, Clone)]
pub struct NotificationSurface {
    current: Option<Notification>,
}

impl NotificationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Tone::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(Tone::Error, message);
    }

    /// Show a notification, replacing whatever is open.
    pub fn show(&mut self, tone: Tone, message: impl Into<String>) {
        let notification = Notification {
            tone,
            title: tone.title().to_string(),
            message: message.into(),
        };
        tracing::debug!(
            "Notification [{}]: {}",
            notification.title,
            notification.message
        );
        self.current = Some(notification);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
