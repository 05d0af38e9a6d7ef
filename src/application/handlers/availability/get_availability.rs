//! GetAvailabilityHandler - Query for a client's availability.

use std::sync::Arc;

use crate::domain::business::Availability;
use crate::domain::foundation::{ClientId, DomainError};
use crate::ports::BusinessInfoRepository;

pub struct GetAvailabilityHandler {
    business_info: Arc<dyn BusinessInfoRepository>,
}

impl GetAvailabilityHandler {
    pub fn new(business_info: Arc<dyn BusinessInfoRepository>) -> Self {
        Self { business_info }
    }

    /// Empty availability when the client has no business info.
    pub async fn handle(&self, client_id: ClientId) -> Result<Availability, DomainError> {
        self.business_info.get_availability(&client_id).await
    }
}
