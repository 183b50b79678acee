use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tablegraph_core::mapping::{resolver_error_to_status_code, ResolverError, ResponseEnvelope};

/// Status code for a resolver error.
pub fn status_for(error: &ResolverError) -> StatusCode {
    StatusCode::from_u16(resolver_error_to_status_code(error))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, envelope) =
            if let Some(resolver_error) = self.0.downcast_ref::<ResolverError>() {
                (
                    status_for(resolver_error),
                    ResponseEnvelope::from_error(resolver_error),
                )
            } else {
                tracing::error!(error = %self.0, "Application error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseEnvelope {
                        items: Vec::new(),
                        error: Some(format!("Internal: {}", self.0)),
                    },
                )
            };

        (status_code, Json(envelope)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_resolver_error_keeps_its_status() {
        let error = AppError::from(ResolverError::ValidationError("bad".to_string()));

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"items": [], "error": "ValidationError: bad"})
        );
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let error = AppError::from(anyhow::anyhow!("boom"));

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"items": [], "error": "Internal: boom"})
        );
    }
}
