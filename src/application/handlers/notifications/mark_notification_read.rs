//! MarkNotificationReadHandler - Flags a notification as read.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, id: NotificationId) -> Result<Notification, DomainError> {
        self.notifications.mark_read(&id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
                .with_detail("notification_id", id.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::notification::NewNotification;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn marks_read() {
        let store = Arc::new(InMemoryStore::new());
        let created = NotificationRepository::create(
            store.as_ref(),
            NewNotification::new(Uuid::new_v4(), "appointment", "t", "b", json!({})),
        )
        .await
        .unwrap();
        assert!(!created.read);

        let read = MarkNotificationReadHandler::new(store).handle(created.id).await.unwrap();
        assert!(read.read);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = MarkNotificationReadHandler::new(store)
            .handle(NotificationId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationNotFound);
    }
}
