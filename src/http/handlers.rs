//! Request handlers for the fixed service endpoints.

use axum::{
    extract::State,
    http::{header, Uri},
    response::{Html, IntoResponse, Json},
};

use crate::context::ServerContext;
use crate::http::payload::{HealthStatus, ServiceInfo};
use crate::http::response::AppError;

/// `GET /health`
pub async fn health(State(ctx): State<ServerContext>) -> Json<HealthStatus> {
    Json(HealthStatus::capture(&ctx))
}

/// `GET /api/info`
pub async fn info(State(ctx): State<ServerContext>) -> Json<ServiceInfo> {
    Json(ctx.service_info().clone())
}

/// `GET /`: the landing page from the static root.
pub async fn index(State(ctx): State<ServerContext>, uri: Uri) -> Result<impl IntoResponse, AppError> {
    let path = ctx.static_root().join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(([(header::CACHE_CONTROL, "public, max-age=0")], Html(html))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(file = %path.display(), "Landing page missing from static root");
            Err(AppError::not_found(uri.path()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Catch-all for anything no route or static asset answered.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::not_found(uri.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RuntimeMode;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn index_missing_is_not_found() {
        let ctx = ServerContext::new("/nonexistent/static/root", RuntimeMode::Production, "test");
        let err = index(State(ctx), Uri::from_static("/")).await.err().unwrap();
        assert!(matches!(err, AppError::NotFound { ref path } if path == "/"));
    }

    #[tokio::test]
    async fn not_found_uses_request_path() {
        let response = not_found(Uri::from_static("/missing?x=1")).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["path"], "/missing");
    }
}
