//! Ports layer - Interfaces for external dependencies.
//!
//! Ports define the contracts that adapters must implement. They allow the
//! application handlers to stay independent of PostgreSQL, OpenAI and Stripe.
//!
//! # Port Types
//!
//! - **Repositories** - clients, business info, appointments, notifications
//!   and subscriptions in the relational store
//! - **AssistantGateway** - AI reply generation (threaded or stateless)
//! - **PaymentProvider** - Payment processing (Stripe)

mod appointment_repository;
mod assistant_gateway;
mod business_info_repository;
mod client_repository;
mod notification_repository;
mod payment_provider;
mod subscription_repository;

pub use appointment_repository::AppointmentRepository;
pub use assistant_gateway::{AIError, AssistantGateway, AssistantReply, AssistantRequest};
pub use business_info_repository::BusinessInfoRepository;
pub use client_repository::ClientRepository;
pub use notification_repository::NotificationRepository;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, Customer, PaymentError,
    PaymentErrorCode, PaymentIntent, PaymentProvider, Subscription, SubscriptionItem,
    SubscriptionStatus, PAYMENT_HISTORY_LIMIT,
};
pub use subscription_repository::{PlanChange, SubscriptionRepository};
