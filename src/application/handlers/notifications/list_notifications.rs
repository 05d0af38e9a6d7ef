//! ListNotificationsHandler - Query for a client's notifications.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::notification::Notification;
use crate::ports::{BusinessInfoRepository, NotificationRepository};

pub struct ListNotificationsHandler {
    business_info: Arc<dyn BusinessInfoRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(
        business_info: Arc<dyn BusinessInfoRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            business_info,
            notifications,
        }
    }

    /// Newest first. Empty when the client has no business info.
    pub async fn handle(&self, client_id: ClientId) -> Result<Vec<Notification>, DomainError> {
        match self.business_info.find_business_info_id(&client_id).await? {
            Some(owner) => self.notifications.list_for_client(owner.as_uuid()).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::business::BusinessProfile;
    use crate::domain::notification::NewNotification;
    use serde_json::json;

    #[tokio::test]
    async fn lists_notifications_of_business_info() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", None);
        let owner = store.seed_business_info(client_id, BusinessProfile::default());
        for title in ["first", "second"] {
            NotificationRepository::create(
                store.as_ref(),
                NewNotification::new(*owner.as_uuid(), "appointment", title, "", json!({})),
            )
            .await
            .unwrap();
        }

        let listed = ListNotificationsHandler::new(store.clone(), store)
            .handle(client_id)
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "second");
    }

    #[tokio::test]
    async fn client_without_business_info_has_none() {
        let store = Arc::new(InMemoryStore::new());
        let listed = ListNotificationsHandler::new(store.clone(), store)
            .handle(ClientId::new())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
