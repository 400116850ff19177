//! Toast notifications
//!
//! A notification moves through `absent -> visible -> dismissed -> removed`.
//! [`NotificationCenter`] owns the state machine and the lazily created
//! container; everything visual goes through a [`ToastRenderer`] so the
//! lifecycle can be driven and tested without a terminal.
//!
//! Time is passed in explicitly (`notify_at`, `expire`) so auto-dismissal is
//! deterministic; the `notify` convenience uses `Instant::now()`.

use std::fmt;
use std::time::{Duration, Instant};

/// Default delay before a visible notification dismisses itself
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(5);

/// Stacking order of the container; above everything else on the page
pub const CONTAINER_Z_INDEX: u32 = 9999;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Success => "✅",
            Severity::Warning => "⚠️",
            Severity::Danger => "❌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    Visible,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Timeout,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerPosition {
    TopRight,
}

/// Singleton region holding every live notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastContainer {
    pub position: ContainerPosition,
    pub z_index: u32,
}

impl Default for ToastContainer {
    fn default() -> Self {
        Self {
            position: ContainerPosition::TopRight,
            z_index: CONTAINER_Z_INDEX,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub state: NotificationState,
    pub created_at: Instant,
    pub dismiss_at: Option<Instant>,
}

/// Rendering boundary for notifications
pub trait ToastRenderer {
    /// Called once, the first time a notification needs a container
    fn container_created(&mut self, _container: &ToastContainer) {}

    /// A notification became visible
    fn attach(&mut self, notification: &Notification);

    /// A visible notification started dismissing
    fn dismissed(&mut self, _notification: &Notification, _reason: DismissReason) {}

    /// The element is gone; the id will not be seen again
    fn detach(&mut self, _id: NotificationId) {}
}

pub struct NotificationCenter<R: ToastRenderer> {
    renderer: R,
    container: Option<ToastContainer>,
    notifications: Vec<Notification>,
    next_id: NotificationId,
    auto_dismiss: Option<Duration>,
}

impl<R: ToastRenderer> NotificationCenter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            container: None,
            notifications: Vec::new(),
            next_id: 1,
            auto_dismiss: Some(DEFAULT_AUTO_DISMISS),
        }
    }

    /// `None` keeps notifications until they are dismissed by hand
    pub fn with_auto_dismiss(mut self, delay: Option<Duration>) -> Self {
        self.auto_dismiss = delay;
        self
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.notify_at(message, severity, Instant::now())
    }

    pub fn notify_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> NotificationId {
        if self.container.is_none() {
            let container = ToastContainer::default();
            self.renderer.container_created(&container);
            self.container = Some(container);
        }

        let id = self.next_id;
        self.next_id += 1;

        let notification = Notification {
            id,
            message: message.into(),
            severity,
            state: NotificationState::Visible,
            created_at: now,
            dismiss_at: self.auto_dismiss.map(|delay| now + delay),
        };

        self.renderer.attach(&notification);
        self.notifications.push(notification);
        id
    }

    /// Explicit user dismissal. Returns `false` unless `id` was visible.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.transition_to_dismissed(id, DismissReason::User)
    }

    /// Dismiss every visible notification whose deadline is at or before `now`
    pub fn expire(&mut self, now: Instant) -> Vec<NotificationId> {
        let due: Vec<NotificationId> = self
            .notifications
            .iter()
            .filter(|n| n.state == NotificationState::Visible)
            .filter(|n| n.dismiss_at.is_some_and(|at| at <= now))
            .map(|n| n.id)
            .collect();

        for id in &due {
            self.transition_to_dismissed(*id, DismissReason::Timeout);
        }
        due
    }

    /// Dismissal finished: detach the element. Returns `false` unless `id`
    /// was dismissed.
    pub fn complete_dismissal(&mut self, id: NotificationId) -> bool {
        let Some(index) = self
            .notifications
            .iter()
            .position(|n| n.id == id && n.state == NotificationState::Dismissed)
        else {
            return false;
        };

        self.notifications.remove(index);
        self.renderer.detach(id);
        true
    }

    /// Dismiss and remove everything still held
    pub fn clear(&mut self) {
        let ids: Vec<NotificationId> = self.notifications.iter().map(|n| n.id).collect();
        for id in ids {
            self.transition_to_dismissed(id, DismissReason::User);
            self.complete_dismissal(id);
        }
    }

    /// `None` once a notification has been removed (or never existed)
    pub fn state(&self, id: NotificationId) -> Option<NotificationState> {
        self.notifications
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.state)
    }

    /// Visible notifications in creation order
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(|n| n.state == NotificationState::Visible)
    }

    pub fn container(&self) -> Option<&ToastContainer> {
        self.container.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn transition_to_dismissed(&mut self, id: NotificationId, reason: DismissReason) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.state == NotificationState::Visible)
        else {
            return false;
        };

        notification.state = NotificationState::Dismissed;
        self.renderer.dismissed(notification, reason);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        containers: usize,
        attached: Vec<(NotificationId, String, Severity)>,
        dismissed: Vec<(NotificationId, DismissReason)>,
        detached: Vec<NotificationId>,
    }

    impl ToastRenderer for RecordingRenderer {
        fn container_created(&mut self, container: &ToastContainer) {
            assert_eq!(container.z_index, CONTAINER_Z_INDEX);
            self.containers += 1;
        }

        fn attach(&mut self, notification: &Notification) {
            self.attached.push((
                notification.id,
                notification.message.clone(),
                notification.severity,
            ));
        }

        fn dismissed(&mut self, notification: &Notification, reason: DismissReason) {
            self.dismissed.push((notification.id, reason));
        }

        fn detach(&mut self, id: NotificationId) {
            self.detached.push(id);
        }
    }

    #[test]
    fn test_container_created_lazily_once() {
        let mut center = NotificationCenter::new(RecordingRenderer::default());
        assert!(center.container().is_none());

        center.notify("one", Severity::Info);
        center.notify("two", Severity::Success);

        assert_eq!(center.renderer().containers, 1);
        assert_eq!(
            center.container().map(|c| c.position),
            Some(ContainerPosition::TopRight)
        );
    }

    #[test]
    fn test_three_notifications_visible_in_creation_order() {
        let mut center = NotificationCenter::new(RecordingRenderer::default());
        let a = center.notify("first", Severity::Info);
        let b = center.notify("second", Severity::Warning);
        let c = center.notify("third", Severity::Danger);

        let visible: Vec<&str> = center.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(visible, vec!["first", "second", "third"]);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_dismissing_one_leaves_others_untouched() {
        let mut center = NotificationCenter::new(RecordingRenderer::default());
        let a = center.notify("first", Severity::Info);
        let b = center.notify("second", Severity::Info);
        let c = center.notify("third", Severity::Info);

        assert!(center.dismiss(b));
        assert_eq!(center.state(b), Some(NotificationState::Dismissed));
        assert!(center.complete_dismissal(b));
        assert_eq!(center.state(b), None);

        let visible: Vec<NotificationId> = center.visible().map(|n| n.id).collect();
        assert_eq!(visible, vec![a, c]);
        assert_eq!(center.renderer().detached, vec![b]);
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut center = NotificationCenter::new(RecordingRenderer::default());
        let id = center.notify("only", Severity::Info);

        // Cannot remove before dismissing
        assert!(!center.complete_dismissal(id));
        assert!(center.dismiss(id));
        // Already dismissed
        assert!(!center.dismiss(id));
        assert!(center.complete_dismissal(id));
        assert!(!center.complete_dismissal(id));
        // Unknown id
        assert!(!center.dismiss(42));
    }

    #[test]
    fn test_expire_dismisses_only_due_notifications() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(RecordingRenderer::default())
            .with_auto_dismiss(Some(Duration::from_secs(5)));

        let early = center.notify_at("early", Severity::Info, start);
        let late = center.notify_at("late", Severity::Info, start + Duration::from_secs(3));

        assert!(center.expire(start + Duration::from_secs(4)).is_empty());

        let expired = center.expire(start + Duration::from_secs(5));
        assert_eq!(expired, vec![early]);
        assert_eq!(center.state(late), Some(NotificationState::Visible));
        assert_eq!(
            center.renderer().dismissed,
            vec![(early, DismissReason::Timeout)]
        );
    }

    #[test]
    fn test_no_auto_dismiss_keeps_notifications() {
        let start = Instant::now();
        let mut center =
            NotificationCenter::new(RecordingRenderer::default()).with_auto_dismiss(None);
        center.notify_at("sticky", Severity::Warning, start);

        assert!(center.expire(start + Duration::from_secs(3600)).is_empty());
        assert_eq!(center.visible().count(), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut center = NotificationCenter::new(RecordingRenderer::default());
        let a = center.notify("a", Severity::Info);
        let b = center.notify("b", Severity::Info);
        center.dismiss(a);

        center.clear();

        assert_eq!(center.visible().count(), 0);
        assert_eq!(center.state(a), None);
        assert_eq!(center.state(b), None);
        assert_eq!(center.renderer().detached, vec![a, b]);
    }
}
