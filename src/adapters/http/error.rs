//! HTTP error mapping.
//!
//! Every failing endpoint answers with `{error, details?}`; the status code
//! depends on whether the request or a dependency was at fault.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::BillingError;
use crate::application::handlers::conversation::ConversationError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Message returned when `/respond` is missing a required field.
pub const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Message returned when a conversation turn fails downstream.
pub const RESPOND_FAILED: &str = "Error processing NNIA request";

/// Error body shared by both servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Internal { error: String, details: Option<String> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal(error: impl Into<String>, details: Option<String>) -> Self {
        ApiError::Internal {
            error: error.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorResponse {
        match self {
            ApiError::BadRequest(error) => ErrorResponse {
                error,
                details: None,
            },
            ApiError::Internal { error, details } => ErrorResponse { error, details },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.into_body())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ApiError::BadRequest(err.message),
            code if code.is_not_found() => ApiError::BadRequest(err.message),
            _ => {
                tracing::error!(error = %err, "Request failed");
                ApiError::internal(err.message, None)
            }
        }
    }
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        tracing::error!(error = %err, "Conversation turn failed");
        ApiError::internal(RESPOND_FAILED, Some(err.to_string()))
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        if err.is_client_error() {
            return ApiError::BadRequest(err.to_string());
        }
        tracing::error!(error = %err, "Billing request failed");
        ApiError::internal(err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{AIError, PaymentError};

    #[test]
    fn validation_maps_to_400() {
        let err: ApiError = DomainError::validation("date", "Field 'date' cannot be empty").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_codes_map_to_400() {
        let err: ApiError = DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found").into();
        assert_eq!(err, ApiError::BadRequest("Appointment not found".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_keeps_message() {
        let err: ApiError = DomainError::database("Failed to list", "connection reset").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_body().error, "Failed to list: connection reset");
    }

    #[test]
    fn conversation_errors_carry_details() {
        let err: ApiError = ConversationError::Provider(AIError::AuthenticationFailed).into();
        let body = err.into_body();
        assert_eq!(body.error, RESPOND_FAILED);
        assert_eq!(body.details.as_deref(), Some("authentication failed"));
    }

    #[test]
    fn conversation_not_found_is_still_500() {
        let err: ApiError = ConversationError::Store(DomainError::new(
            ErrorCode::ClientNotFound,
            "Client not found",
        ))
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn billing_errors_split_by_cause() {
        let err: ApiError = BillingError::ClientNotFound.into();
        assert_eq!(err, ApiError::BadRequest("Client not found".to_string()));

        let err: ApiError = BillingError::Payment(PaymentError::network("reset")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let body = ApiError::bad_request("nope").into_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "nope" }));
    }
}
