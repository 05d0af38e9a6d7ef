//! PostgreSQL implementation of BusinessInfoRepository.
//!
//! `appointment_days` and `appointment_types` are delimited text columns;
//! conversion to lists happens in [`Availability`].

use crate::domain::business::{Availability, BusinessProfile};
use crate::domain::foundation::{BusinessInfoId, ClientId, DomainError, ErrorCode};
use crate::ports::BusinessInfoRepository;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresBusinessInfoRepository {
    pool: PgPool,
}

impl PostgresBusinessInfoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    client_business_name: Option<String>,
    info: Option<Value>,
}

#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    appointment_days: Option<String>,
    appointment_hours: Option<String>,
    appointment_types: Option<String>,
}

impl From<AvailabilityRow> for Availability {
    fn from(row: AvailabilityRow) -> Self {
        Availability::from_stored(
            row.appointment_days.as_deref(),
            row.appointment_hours.as_deref(),
            row.appointment_types.as_deref(),
        )
    }
}

#[async_trait]
impl BusinessInfoRepository for PostgresBusinessInfoRepository {
    async fn get_public_profile(&self, client_id: &ClientId) -> Result<BusinessProfile, DomainError> {
        // Whole-row jsonb keeps the query stable as profile columns are added.
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT c.business_name AS client_business_name, to_jsonb(bi) AS info
            FROM clients c
            LEFT JOIN business_info bi ON bi.client_id = c.id
            WHERE c.id = $1
            LIMIT 1
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch business profile", e))?;

        let row = row.ok_or_else(|| {
            DomainError::new(ErrorCode::ClientNotFound, "Client not found")
                .with_detail("client_id", client_id.to_string())
        })?;

        let info = row.info.ok_or_else(|| {
            DomainError::new(ErrorCode::BusinessInfoNotFound, "Business info not found")
                .with_detail("client_id", client_id.to_string())
        })?;

        BusinessProfile::from_row(row.client_business_name, &info).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid business_info row: {}", e),
            )
        })
    }

    async fn find_business_info_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<BusinessInfoId>, DomainError> {
        let id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM business_info WHERE client_id = $1 LIMIT 1
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch business info id", e))?;

        Ok(id.map(BusinessInfoId::from_uuid))
    }

    async fn get_availability(&self, client_id: &ClientId) -> Result<Availability, DomainError> {
        let row: Option<AvailabilityRow> = sqlx::query_as(
            r#"
            SELECT appointment_days, appointment_hours, appointment_types
            FROM business_info
            WHERE client_id = $1
            LIMIT 1
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch availability", e))?;

        Ok(row.map(Availability::from).unwrap_or_default())
    }

    async fn set_availability(
        &self,
        client_id: &ClientId,
        availability: &Availability,
    ) -> Result<Availability, DomainError> {
        let stored = availability.to_stored();

        let row: Option<AvailabilityRow> = sqlx::query_as(
            r#"
            UPDATE business_info
            SET appointment_days = $2,
                appointment_hours = $3,
                appointment_types = $4
            WHERE client_id = $1
            RETURNING appointment_days, appointment_hours, appointment_types
            "#,
        )
        .bind(client_id.as_uuid())
        .bind(&stored.appointment_days)
        .bind(&stored.appointment_hours)
        .bind(&stored.appointment_types)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update availability", e))?;

        Ok(row.map(Availability::from).unwrap_or_default())
    }
}
