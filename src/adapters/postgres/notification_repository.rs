//! PostgreSQL implementation of NotificationRepository.

use crate::domain::foundation::{DomainError, NotificationId};
use crate::domain::notification::{NewNotification, Notification};
use crate::ports::NotificationRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    client_id: Uuid,
    kind: String,
    title: String,
    body: String,
    data: Option<Value>,
    read: Option<bool>,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: NotificationId::from_uuid(row.id),
            client_id: row.client_id,
            kind: row.kind,
            title: row.title,
            body: row.body,
            data: row
                .data
                .filter(Value::is_object)
                .unwrap_or_else(|| Value::Object(Default::default())),
            read: row.read.unwrap_or(false),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, input: NewNotification) -> Result<Notification, DomainError> {
        let row: NotificationRow = sqlx::query_as(
            r#"
            INSERT INTO notifications (id, client_id, "type", title, body, data, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
            RETURNING id, client_id, "type" AS kind, title, body, data, read, created_at
            "#,
        )
        .bind(NotificationId::new().as_uuid())
        .bind(input.client_id)
        .bind(&input.kind)
        .bind(&input.title)
        .bind(&input.body)
        .bind(&input.data)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to create notification", e))?;

        Ok(row.into())
    }

    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<Notification>, DomainError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, "type" AS kind, title, body, data, read, created_at
            FROM notifications
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list notifications", e))?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        let row: Option<NotificationRow> = sqlx::query_as(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1
            RETURNING id, client_id, "type" AS kind, title, body, data, read, created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to mark notification read", e))?;

        Ok(row.map(Notification::from))
    }
}
