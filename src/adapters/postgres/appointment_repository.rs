//! PostgreSQL implementation of AppointmentRepository.
//!
//! `date` and `time` are read as text (`YYYY-MM-DD`, `HH:MM`), so ordering by
//! them is chronological.

use crate::domain::appointment::{Appointment, AppointmentChanges, NewAppointment, DEFAULT_STATUS};
use crate::domain::foundation::{AppointmentId, ClientId, DomainError};
use crate::ports::AppointmentRepository;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    client_id: Uuid,
    name: Option<String>,
    email: Option<String>,
    appointment_type: Option<String>,
    date: String,
    time: String,
    status: Option<String>,
    origin: Option<String>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: AppointmentId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            name: row.name,
            email: row.email,
            appointment_type: row.appointment_type,
            date: row.date,
            time: row.time,
            status: row.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            origin: row.origin,
        }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    async fn list_for_client(&self, client_id: &ClientId) -> Result<Vec<Appointment>, DomainError> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, name, email, "type" AS appointment_type,
                   date::text AS date, time::text AS time, status, origin
            FROM appointments
            WHERE client_id = $1
            ORDER BY date ASC, time ASC
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list appointments", e))?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn create(&self, input: NewAppointment) -> Result<Appointment, DomainError> {
        let appointment = input.into_appointment(AppointmentId::new());

        let row: AppointmentRow = sqlx::query_as(
            r#"
            INSERT INTO appointments (id, client_id, name, email, "type", date, time, status, origin)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, client_id, name, email, "type" AS appointment_type,
                      date::text AS date, time::text AS time, status, origin
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.client_id.as_uuid())
        .bind(&appointment.name)
        .bind(&appointment.email)
        .bind(&appointment.appointment_type)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.status)
        .bind(&appointment.origin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to create appointment", e))?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: &AppointmentId,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, DomainError> {
        let row: Option<AppointmentRow> = sqlx::query_as(
            r#"
            UPDATE appointments SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                "type" = COALESCE($4, "type"),
                date = COALESCE($5, date),
                time = COALESCE($6, time),
                status = COALESCE($7, status),
                origin = COALESCE($8, origin)
            WHERE id = $1
            RETURNING id, client_id, name, email, "type" AS appointment_type,
                      date::text AS date, time::text AS time, status, origin
            "#,
        )
        .bind(id.as_uuid())
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.appointment_type)
        .bind(&changes.date)
        .bind(&changes.time)
        .bind(&changes.status)
        .bind(&changes.origin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update appointment", e))?;

        Ok(row.map(Appointment::from))
    }

    async fn delete(&self, id: &AppointmentId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete appointment", e))?;

        Ok(())
    }
}
