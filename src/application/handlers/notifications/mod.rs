//! Notification handlers.
//!
//! Owner notifications are keyed by the `business_info` id; listing resolves
//! it from the client id.

mod list_notifications;
mod mark_notification_read;

pub use list_notifications::ListNotificationsHandler;
pub use mark_notification_read::MarkNotificationReadHandler;
