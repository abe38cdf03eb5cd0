use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnauthedPingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/test/unauthed-ping",
    tag = "testing",
    responses(
        (status = 200, description = "Liveness check", body = UnauthedPingResponse)
    )
)]
pub async fn unauthed_ping() -> impl IntoResponse {
    Json(UnauthedPingResponse {
        message: "unauthed-ping".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{send, test_app};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use grocery_core::FixedEstimator;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unauthed_ping() {
        let app = test_app(Arc::new(FixedEstimator::new()));
        let request = Request::get("/api/test/unauthed-ping")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "unauthed-ping");
    }
}
