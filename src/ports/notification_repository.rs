//! Notification repository port.

use crate::domain::foundation::{DomainError, NotificationId};
use crate::domain::notification::{NewNotification, Notification};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, input: NewNotification) -> Result<Notification, DomainError>;

    /// Notifications for an owner id, newest first.
    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<Notification>, DomainError>;

    /// Flags a notification as read. Returns `None` if it does not exist.
    async fn mark_read(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn NotificationRepository) {}
    }
}
