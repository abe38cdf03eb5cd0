use crate::api::{
    body_rejection_response, flow_error_response, ErrorResponse, ValidationErrorResponse,
};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::Router;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use grocery_core::{suggest, Recipe, RecipeRequest, RecipeResult};
use utoipa::OpenApi;

const FAILURE_MESSAGE: &str = "An error occurred while suggesting recipes. Please try again.";

/// Returns the router for /api/recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/suggest", post(suggest_recipes))
}

/// Suggest recipes from a list of grocery items
///
/// Returns 2-3 recipes; every listed ingredient is one of the submitted items.
#[utoipa::path(
    post,
    path = "/api/recipes/suggest",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe suggestions", body = RecipeResult),
        (status = 400, description = "Invalid item list", body = ValidationErrorResponse),
        (status = 503, description = "Recipe suggestion unavailable", body = ErrorResponse)
    )
)]
pub async fn suggest_recipes(
    State(ctx): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return body_rejection_response(rejection),
    };

    match suggest(ctx.estimator.as_ref(), &ctx.policy.recipes, &request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => flow_error_response(e, FAILURE_MESSAGE),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(suggest_recipes),
    components(schemas(RecipeRequest, RecipeResult, Recipe))
)]
pub struct ApiDoc;
