//! SetAvailabilityHandler - Overwrites a client's availability.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::business::Availability;
use crate::domain::foundation::{ClientId, DomainError};
use crate::ports::BusinessInfoRepository;

pub struct SetAvailabilityHandler {
    business_info: Arc<dyn BusinessInfoRepository>,
}

impl SetAvailabilityHandler {
    pub fn new(business_info: Arc<dyn BusinessInfoRepository>) -> Self {
        Self { business_info }
    }

    /// Returns what the store now holds, rebuilt from its delimited form.
    pub async fn handle(
        &self,
        client_id: ClientId,
        availability: Availability,
    ) -> Result<Availability, DomainError> {
        let stored = self
            .business_info
            .set_availability(&client_id, &availability)
            .await?;

        if stored.is_empty() && !availability.is_empty() {
            warn!(client_id = %client_id, "Availability not saved: client has no business info");
        } else {
            info!(client_id = %client_id, days = stored.days.len(), types = stored.types.len(), "Availability updated");
        }
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::availability::GetAvailabilityHandler;
    use crate::domain::business::BusinessProfile;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = Arc::new(InMemoryStore::new());
        let client_id = store.seed_client("owner@example.com", None);
        store.seed_business_info(client_id, BusinessProfile::default());

        let wanted = Availability::new(
            vec!["mon".to_string(), "tue".to_string()],
            "9-5",
            vec!["call".to_string()],
        );
        let saved = SetAvailabilityHandler::new(store.clone())
            .handle(client_id, wanted.clone())
            .await
            .unwrap();
        let read = GetAvailabilityHandler::new(store.clone())
            .handle(client_id)
            .await
            .unwrap();

        assert_eq!(saved, wanted);
        assert_eq!(read, wanted);
        assert_eq!(
            store.stored_availability(&client_id).unwrap().appointment_days,
            "mon,tue"
        );
    }

    #[tokio::test]
    async fn without_business_info_returns_empty() {
        let store = Arc::new(InMemoryStore::new());
        let saved = SetAvailabilityHandler::new(store)
            .handle(
                ClientId::new(),
                Availability::new(vec!["mon".to_string()], "9-5", vec![]),
            )
            .await
            .unwrap();
        assert!(saved.is_empty());
    }
}
