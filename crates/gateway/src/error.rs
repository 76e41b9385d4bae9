//! Error envelope for the HTTP surface.
//!
//! Lower layers return typed errors unchanged; this module maps them to
//! `{status, title, details: [{field?, text}]}` with a status code chosen
//! by category: 400 validation/bad-request, 404 not-found, 409 conflict,
//! 500 internal.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use groundwork_users::UserError;
use serde::Serialize;
use tracing::error;

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub text: String,
}

/// An error ready to be rendered as the envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    details: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn new(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status,
            details: vec![ErrorDetail {
                field: None,
                text: text.into(),
            }],
        }
    }

    pub fn with_field(status: StatusCode, field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            status,
            details: vec![ErrorDetail {
                field: Some(field.into()),
                text: text.into(),
            }],
        }
    }

    pub fn bad_request(text: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, text)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            title: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::NameRequired => {
                Self::with_field(StatusCode::BAD_REQUEST, "name", err.to_string())
            }
            UserError::EmailRequired => {
                Self::with_field(StatusCode::BAD_REQUEST, "email", err.to_string())
            }
            UserError::PasswordRequired | UserError::PasswordTooShort => {
                Self::with_field(StatusCode::BAD_REQUEST, "password", err.to_string())
            }
            UserError::NotFound => Self::new(StatusCode::NOT_FOUND, "user not found"),
            UserError::EmailTaken => Self::new(StatusCode::CONFLICT, "resource already exists"),
            UserError::PasswordHash | UserError::Repo(_) => {
                error!(error = %err, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
