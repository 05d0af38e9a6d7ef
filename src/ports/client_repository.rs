//! Client repository port.
//!
//! Client accounts are created elsewhere; this service only reads them and
//! records the payment processor customer once it has been provisioned.

use crate::domain::business::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode};
use async_trait::async_trait;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find a client by ID.
    ///
    /// Returns `None` if the client does not exist.
    async fn find_client(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Get a client by ID.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client does not exist
    /// - `DatabaseError` on store failure
    async fn get_client(&self, id: &ClientId) -> Result<Client, DomainError> {
        self.find_client(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::ClientNotFound, "Client not found")
                .with_detail("client_id", id.to_string())
        })
    }

    /// Record the payment processor customer for a client.
    ///
    /// Only writes when the client has no customer yet. Returns `true` if the
    /// row was updated.
    async fn assign_stripe_customer_id(
        &self,
        id: &ClientId,
        customer_id: &str,
    ) -> Result<bool, DomainError>;
}
