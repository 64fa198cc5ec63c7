//! Notification delivery seam.

use log::info;

/// Title shared by every reminder notification.
pub const REMINDER_TITLE: &str = "StudyBuddy Reminder";

/// Message produced by the reminder check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    /// Incomplete tasks due today at the time of the check.
    pub due_today: usize,
}

impl Reminder {
    pub fn for_due_count(due_today: usize) -> Self {
        let body = if due_today > 0 {
            format!("You have {due_today} tasks due today! Stay focused! 🎯")
        } else {
            "Time to study! Check your schedule for today.".to_string()
        };
        Self {
            title: REMINDER_TITLE.to_string(),
            body,
            due_today,
        }
    }
}

/// Host permission state for system notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undecided,
}

/// Host notification facility.
pub trait Notifier {
    /// Current permission, or `None` when the host has no notification support.
    fn permission(&self) -> Option<Permission>;

    /// Asks the user for permission and returns the answer.
    fn request_permission(&self) -> Permission;

    /// Shows a system notification. Only called with permission granted.
    fn show(&self, reminder: &Reminder);

    /// Synchronous user-visible fallback.
    fn alert(&self, reminder: &Reminder);
}

/// How a reminder reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Notification,
    Alert,
}

/// Delivers `reminder`, falling back to an alert when notifications are
/// unsupported or not permitted.
pub fn deliver(notifier: &dyn Notifier, reminder: &Reminder) -> Delivery {
    let permission = match notifier.permission() {
        Some(Permission::Undecided) => Some(notifier.request_permission()),
        other => other,
    };

    let delivery = if permission == Some(Permission::Granted) {
        notifier.show(reminder);
        Delivery::Notification
    } else {
        notifier.alert(reminder);
        Delivery::Alert
    };
    info!(
        "event=reminder_deliver module=reminder status=ok channel={:?} due_today={}",
        delivery, reminder.due_today
    );
    delivery
}

/// Requests notification permission up front when reminders are enabled and
/// the user has not decided yet.
pub fn prepare_notifications(reminders_enabled: bool, notifier: &dyn Notifier) {
    if !reminders_enabled {
        return;
    }
    if notifier.permission() == Some(Permission::Undecided) {
        let answer = notifier.request_permission();
        info!("event=notify_permission module=reminder status=ok answer={answer:?}");
    }
}
