pub mod budget;
pub mod recipes;
pub mod testing;

use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use grocery_core::GroceryError;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

/// Shared error response for estimation failures
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Field-level error for invalid input
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    /// Path of the offending field, e.g. `items[0].quantity`
    pub field: String,
}

/// Map a flow error to a response.
///
/// Validation errors carry their field message; estimation errors are logged
/// and replaced by `failure_message` so collaborator details stay server-side.
pub fn flow_error_response(error: GroceryError, failure_message: &str) -> Response {
    match error {
        GroceryError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                error: e.to_string(),
                field: e.field(),
            }),
        )
            .into_response(),
        GroceryError::Estimation(e) => {
            tracing::warn!("Estimation failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: failure_message.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Map a request body that failed to deserialize to the same field-level
/// shape the validator produces.
///
/// Type errors come back as 400 with the offending path; anything that is not
/// a JSON body at all keeps axum's status.
pub fn body_rejection_response(rejection: JsonRejection) -> Response {
    let (status, field, error) = match &rejection {
        JsonRejection::JsonDataError(e) => {
            let field = rejected_field(&e.body_text());
            let error = rejected_field_message(&field).to_string();
            (StatusCode::BAD_REQUEST, field, error)
        }
        other => (other.status(), "body".to_string(), other.body_text()),
    };

    tracing::debug!(field = %field, "Rejected request body: {}", rejection.body_text());
    (status, Json(ValidationErrorResponse { error, field })).into_response()
}

/// Pull the field path out of an axum deserialization message. The path
/// precedes the serde error (`items[0].quantity: invalid type ...`); a missing
/// field is appended to its parent path.
fn rejected_field(body_text: &str) -> String {
    let detail = body_text
        .split_once(": ")
        .map(|(_, rest)| rest)
        .unwrap_or(body_text);

    let (path, message) = match detail.split_once(": ") {
        Some((path, message)) if !path.contains(' ') => (path, message),
        _ => ("", detail),
    };

    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(name, _)| name);

    match (path, missing) {
        ("", Some(name)) => name.to_string(),
        ("", None) => "body".to_string(),
        (path, Some(name)) => format!("{}.{}", path, name),
        (path, None) => path.to_string(),
    }
}

fn rejected_field_message(field: &str) -> &'static str {
    if field == "budget" {
        "Please enter a valid number."
    } else if field.ends_with(".quantity") {
        "Quantity must be a number."
    } else if field.ends_with(".name") {
        "Item name is required."
    } else if field == "items" {
        "Please add at least one item."
    } else {
        "Invalid request body."
    }
}

/// Returns the router for every /api endpoint
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .merge(testing::router())
        .nest("/api/budget", budget::router())
        .nest("/api/recipes", recipes::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Grocery Budget API"),
        components(schemas(ErrorResponse, ValidationErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        testing::ApiDoc::openapi(),
        budget::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use grocery_core::{Estimator, Policy};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::{app, AppContext};

    pub fn test_app(estimator: Arc<dyn Estimator>) -> Router {
        app(Arc::new(AppContext {
            estimator,
            policy: Policy::default(),
        }))
    }

    pub async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_field_paths() {
        let prefix = "Failed to deserialize the JSON body into the target type";
        let cases = [
            (
                "items[0].quantity: invalid type: string \"two\", expected f64 at line 1 column 40",
                "items[0].quantity",
            ),
            (
                "items[1]: missing field `quantity` at line 1 column 30",
                "items[1].quantity",
            ),
            ("missing field `budget` at line 1 column 20", "budget"),
            (
                "budget: invalid type: string \"lots\", expected f64 at line 1 column 50",
                "budget",
            ),
            ("invalid type: integer `3`, expected a map", "body"),
        ];

        for (detail, field) in cases {
            assert_eq!(rejected_field(&format!("{}: {}", prefix, detail)), field);
        }
    }

    #[test]
    fn test_rejected_field_messages() {
        assert_eq!(rejected_field_message("budget"), "Please enter a valid number.");
        assert_eq!(
            rejected_field_message("items[2].quantity"),
            "Quantity must be a number."
        );
        assert_eq!(rejected_field_message("items[0].name"), "Item name is required.");
        assert_eq!(rejected_field_message("body"), "Invalid request body.");
    }

    #[test]
    fn test_openapi_lists_all_paths() {
        let spec = openapi();
        for path in [
            "/api/budget/evaluate",
            "/api/recipes/suggest",
            "/api/test/unauthed-ping",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
        let schemas = &spec.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("BudgetResult"));
        assert!(schemas.contains_key("ValidationErrorResponse"));
    }
}
