use std::rc::Rc;

use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Error,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pub type NotificationId = u64;

pub enum NotificationAction {
    Show {
        id: NotificationId,
        notification: Notification,
    },
    /// Fired by the auto-dismiss timer of notification `id`.
    Expire(NotificationId),
    Dismiss,
}

/// Holds at most one visible notification; the newest one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSlot {
    current: Option<(NotificationId, Notification)>,
}

impl NotificationSlot {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(_, notification)| notification)
    }

    pub fn current_id(&self) -> Option<NotificationId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    /// Returns whether anything changed. An expiry for a notification that
    /// has already been replaced is ignored.
    pub fn apply(&mut self, action: NotificationAction) -> bool {
        match action {
            NotificationAction::Show { id, notification } => {
                self.current = Some((id, notification));
                true
            }
            NotificationAction::Expire(id) => {
                if self.current_id() == Some(id) {
                    self.current = None;
                    true
                } else {
                    false
                }
            }
            NotificationAction::Dismiss => self.current.take().is_some(),
        }
    }
}

impl Reducible for NotificationSlot {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}
