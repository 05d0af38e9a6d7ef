//! PostgreSQL adapters for the relational store.
//!
//! One repository per table, all sharing a single `PgPool`.

mod appointment_repository;
mod business_info_repository;
mod client_repository;
mod notification_repository;
mod subscription_repository;

pub use appointment_repository::PostgresAppointmentRepository;
pub use business_info_repository::PostgresBusinessInfoRepository;
pub use client_repository::PostgresClientRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
