//! Business info repository port.
//!
//! Reads the public business profile and reads/writes the appointment
//! availability stored on the same `business_info` row.

use crate::domain::business::{Availability, BusinessProfile};
use crate::domain::foundation::{BusinessInfoId, ClientId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait BusinessInfoRepository: Send + Sync {
    /// Public profile of a client's business, with blank fields dropped.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client does not exist
    /// - `BusinessInfoNotFound` if the client has no business info row
    /// - `DatabaseError` on store failure
    async fn get_public_profile(&self, client_id: &ClientId) -> Result<BusinessProfile, DomainError>;

    /// Id of the client's `business_info` row, if one exists.
    async fn find_business_info_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<BusinessInfoId>, DomainError>;

    /// Availability configured for a client.
    ///
    /// A missing row yields the empty shape.
    async fn get_availability(&self, client_id: &ClientId) -> Result<Availability, DomainError>;

    /// Overwrites the client's availability.
    ///
    /// Returns the availability rebuilt from what the store persisted, or the
    /// empty shape if no row was updated.
    async fn set_availability(
        &self,
        client_id: &ClientId,
        availability: &Availability,
    ) -> Result<Availability, DomainError>;
}
