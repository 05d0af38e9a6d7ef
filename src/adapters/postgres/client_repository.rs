//! PostgreSQL implementation of ClientRepository.

use crate::domain::business::Client;
use crate::domain::foundation::{ClientId, DomainError};
use crate::ports::ClientRepository;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Reads `clients` rows and records Stripe customer ids.
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    email: Option<String>,
    business_name: Option<String>,
    stripe_customer_id: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId::from_uuid(row.id),
            email: row.email,
            business_name: row.business_name,
            stripe_customer_id: row.stripe_customer_id,
        }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn find_client(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let row: Option<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, email, business_name, stripe_customer_id
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch client", e))?;

        Ok(row.map(Client::from))
    }

    async fn assign_stripe_customer_id(
        &self,
        id: &ClientId,
        customer_id: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET stripe_customer_id = $2
            WHERE id = $1
              AND (stripe_customer_id IS NULL OR stripe_customer_id = '')
            "#,
        )
        .bind(id.as_uuid())
        .bind(customer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to store Stripe customer", e))?;

        Ok(result.rows_affected() > 0)
    }
}
