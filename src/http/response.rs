//! Error responses and fault shaping.
//!
//! # Responsibilities
//! - Map every request-scoped failure to a JSON `{error, message}` body
//! - Hide fault details unless the server runs in development mode
//! - Convert handler panics into the same 500 body as handler errors
//!
//! # Design Decisions
//! - `AppError::into_response` always renders the generic message and stashes
//!   the real detail in a response extension
//! - `shape_faults` is the single place that knows the runtime mode; it swaps
//!   the detail in for development and logs it in every mode

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ServerContext;

/// Message shown for internal errors outside development mode.
pub const GENERIC_FAULT_MESSAGE: &str = "Something went wrong";

/// Message shown for unmatched paths.
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self {
            error: "Not Found".to_string(),
            message: NOT_FOUND_MESSAGE.to_string(),
            path: Some(path.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            message: message.into(),
            path: None,
        }
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self {
            error: "Payload Too Large".to_string(),
            message: format!("Request body exceeds the {limit} byte limit"),
            path: None,
        }
    }
}

/// Request-scoped failures. Never fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// No route or static asset matched.
    #[error("no resource at {path}")]
    NotFound { path: String },

    /// Anything that went wrong while producing a response.
    #[error("{0}")]
    Fault(String),

    /// Request body over the configured cap.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl AppError {
    pub fn not_found(path: impl Into<String>) -> Self {
        AppError::NotFound { path: path.into() }
    }

    pub fn fault(detail: impl Into<String>) -> Self {
        AppError::Fault(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Fault(err.to_string())
    }
}

/// Fault text carried from the failing handler to `shape_faults`.
#[derive(Debug, Clone)]
pub struct FaultDetail(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::NotFound { path } => (status, Json(ErrorBody::not_found(path))).into_response(),
            AppError::PayloadTooLarge { limit } => {
                (status, Json(ErrorBody::payload_too_large(limit))).into_response()
            }
            AppError::Fault(detail) => {
                let mut response =
                    (status, Json(ErrorBody::internal(GENERIC_FAULT_MESSAGE))).into_response();
                response.extensions_mut().insert(FaultDetail(detail));
                response
            }
        }
    }
}

/// Response used by the panic-catching layer.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Fault(detail).into_response()
}

/// Top-level fault dispatcher.
///
/// Logs faults, swaps the detail into the body in development mode, and turns
/// the body-limit layer's plain-text 413 into the JSON error shape.
pub async fn shape_faults(
    State(ctx): State<ServerContext>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    if let Some(FaultDetail(detail)) = response.extensions_mut().remove::<FaultDetail>() {
        tracing::error!(method = %method, path = %path, error = %detail, "Request failed");
        if ctx.mode().exposes_fault_detail() {
            return (response.status(), Json(ErrorBody::internal(detail))).into_response();
        }
        return response;
    }

    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json(&response) {
        tracing::warn!(method = %method, path = %path, "Request body too large");
        return AppError::PayloadTooLarge {
            limit: ctx.max_body_size(),
        }
        .into_response();
    }

    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
