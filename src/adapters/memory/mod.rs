//! In-memory implementation of the store ports.
//!
//! Backs every repository port with a single process-local state so the
//! HTTP slices can be exercised without PostgreSQL. Useful for:
//! - Integration tests driving the routers
//! - Local development without a database
//!
//! Data does not survive a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::domain::appointment::{Appointment, AppointmentChanges, NewAppointment};
use crate::domain::business::{Availability, BusinessProfile, Client, StoredAvailability};
use crate::domain::foundation::{
    AppointmentId, BusinessInfoId, ClientId, DomainError, ErrorCode, NotificationId,
};
use crate::domain::notification::{NewNotification, Notification};
use crate::ports::{
    AppointmentRepository, BusinessInfoRepository, ClientRepository, NotificationRepository,
    PlanChange, SubscriptionRepository,
};

/// A `subscriptions` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub client_id: ClientId,
    pub plan: String,
    pub tokens_remaining: u64,
    pub status: String,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct BusinessInfoRow {
    id: BusinessInfoId,
    profile: BusinessProfile,
    availability: StoredAvailability,
}

#[derive(Default)]
struct State {
    clients: HashMap<ClientId, Client>,
    business_info: HashMap<ClientId, BusinessInfoRow>,
    appointments: Vec<Appointment>,
    notifications: Vec<Notification>,
    subscriptions: HashMap<String, SubscriptionRecord>,
    fail_notifications: bool,
    unavailable: bool,
}

/// In-memory store implementing all repository ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let client_id = store.seed_client("owner@example.com", Some("Pan y Sal"));
/// store.seed_business_info(client_id, BusinessProfile::default());
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the state, failing like a lost connection when marked unavailable.
    fn live_state(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        let state = self.state();
        if state.unavailable {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "store unavailable",
            ));
        }
        Ok(state)
    }

    /// Adds a client without a Stripe customer.
    pub fn seed_client(&self, email: &str, business_name: Option<&str>) -> ClientId {
        let client = Client {
            id: ClientId::new(),
            email: Some(email.to_string()),
            business_name: business_name.map(str::to_string),
            stripe_customer_id: None,
        };
        let id = client.id;
        self.state().clients.insert(id, client);
        id
    }

    /// Adds or replaces a client row verbatim.
    pub fn put_client(&self, client: Client) {
        self.state().clients.insert(client.id, client);
    }

    /// Adds a `business_info` row for a client, with no availability.
    pub fn seed_business_info(&self, client_id: ClientId, profile: BusinessProfile) -> BusinessInfoId {
        let id = BusinessInfoId::new();
        self.state().business_info.insert(
            client_id,
            BusinessInfoRow {
                id,
                profile,
                availability: StoredAvailability::default(),
            },
        );
        id
    }

    pub fn seed_subscription(&self, stripe_subscription_id: &str, record: SubscriptionRecord) {
        self.state()
            .subscriptions
            .insert(stripe_subscription_id.to_string(), record);
    }

    /// Makes every notification insert fail.
    pub fn fail_notifications(&self, fail: bool) {
        self.state().fail_notifications = fail;
    }

    /// Makes every operation fail with a store error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    pub fn client(&self, id: &ClientId) -> Option<Client> {
        self.state().clients.get(id).cloned()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state().appointments.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state().notifications.clone()
    }

    pub fn subscription(&self, stripe_subscription_id: &str) -> Option<SubscriptionRecord> {
        self.state().subscriptions.get(stripe_subscription_id).cloned()
    }

    /// Availability exactly as stored (delimited text).
    pub fn stored_availability(&self, client_id: &ClientId) -> Option<StoredAvailability> {
        self.state()
            .business_info
            .get(client_id)
            .map(|row| row.availability.clone())
    }
}

fn availability_of(row: &BusinessInfoRow) -> Availability {
    let stored = &row.availability;
    Availability::from_stored(
        Some(stored.appointment_days.as_str()),
        Some(stored.appointment_hours.as_str()),
        Some(stored.appointment_types.as_str()),
    )
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn find_client(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        Ok(self.live_state()?.clients.get(id).cloned())
    }

    async fn assign_stripe_customer_id(
        &self,
        id: &ClientId,
        customer_id: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.live_state()?;
        match state.clients.get_mut(id) {
            Some(client) if client.customer_id().is_none() => {
                client.stripe_customer_id = Some(customer_id.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl BusinessInfoRepository for InMemoryStore {
    async fn get_public_profile(&self, client_id: &ClientId) -> Result<BusinessProfile, DomainError> {
        let state = self.live_state()?;
        let client = state
            .clients
            .get(client_id)
            .ok_or_else(|| DomainError::new(ErrorCode::ClientNotFound, "Client not found"))?;
        let row = state.business_info.get(client_id).ok_or_else(|| {
            DomainError::new(ErrorCode::BusinessInfoNotFound, "Business info not found")
        })?;

        let mut profile = row.profile.clone();
        if profile.business_name.is_none() {
            profile.business_name = client.business_name.clone();
        }
        Ok(profile.strip_empty())
    }

    async fn find_business_info_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<BusinessInfoId>, DomainError> {
        Ok(self.live_state()?.business_info.get(client_id).map(|row| row.id))
    }

    async fn get_availability(&self, client_id: &ClientId) -> Result<Availability, DomainError> {
        Ok(self
            .live_state()?
            .business_info
            .get(client_id)
            .map(availability_of)
            .unwrap_or_default())
    }

    async fn set_availability(
        &self,
        client_id: &ClientId,
        availability: &Availability,
    ) -> Result<Availability, DomainError> {
        let mut state = self.live_state()?;
        Ok(match state.business_info.get_mut(client_id) {
            Some(row) => {
                row.availability = availability.to_stored();
                availability_of(row)
            }
            None => Availability::default(),
        })
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn list_for_client(&self, client_id: &ClientId) -> Result<Vec<Appointment>, DomainError> {
        let mut appointments: Vec<Appointment> = self
            .live_state()?
            .appointments
            .iter()
            .filter(|a| &a.client_id == client_id)
            .cloned()
            .collect();
        appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        Ok(appointments)
    }

    async fn create(&self, input: NewAppointment) -> Result<Appointment, DomainError> {
        let appointment = input.into_appointment(AppointmentId::new());
        self.live_state()?.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn update(
        &self,
        id: &AppointmentId,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, DomainError> {
        let mut state = self.live_state()?;
        Ok(state
            .appointments
            .iter_mut()
            .find(|a| &a.id == id)
            .map(|appointment| {
                changes.apply_to(appointment);
                appointment.clone()
            }))
    }

    async fn delete(&self, id: &AppointmentId) -> Result<(), DomainError> {
        self.live_state()?.appointments.retain(|a| &a.id != id);
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, input: NewNotification) -> Result<Notification, DomainError> {
        let mut state = self.live_state()?;
        if state.fail_notifications {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "notification insert rejected",
            ));
        }
        let notification = input.into_notification(NotificationId::new(), Utc::now());
        state.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<Notification>, DomainError> {
        // Reverse first so equal timestamps keep newest-inserted first.
        let mut notifications: Vec<Notification> = self
            .live_state()?
            .notifications
            .iter()
            .rev()
            .filter(|n| &n.client_id == client_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        let mut state = self.live_state()?;
        Ok(state
            .notifications
            .iter_mut()
            .find(|n| &n.id == id)
            .map(|n| {
                n.read = true;
                n.clone()
            }))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn mark_canceled(
        &self,
        stripe_subscription_id: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        let mut state = self.live_state()?;
        if let Some(record) = state.subscriptions.get_mut(stripe_subscription_id) {
            record.status = "canceled".to_string();
            if current_period_end.is_some() {
                record.current_period_end = current_period_end;
            }
        }
        Ok(())
    }

    async fn apply_plan_change(
        &self,
        stripe_subscription_id: &str,
        change: &PlanChange,
    ) -> Result<(), DomainError> {
        let mut state = self.live_state()?;
        if let Some(record) = state.subscriptions.get_mut(stripe_subscription_id) {
            record.plan = change.plan.clone();
            record.tokens_remaining = change.tokens_remaining;
            if change.current_period_start.is_some() {
                record.current_period_start = change.current_period_start;
            }
            if change.current_period_end.is_some() {
                record.current_period_end = change.current_period_end;
            }
        }
        Ok(())
    }
}
