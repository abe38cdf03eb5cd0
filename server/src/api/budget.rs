use crate::api::{
    body_rejection_response, flow_error_response, ErrorResponse, ValidationErrorResponse,
};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::Router;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use grocery_core::{evaluate, BudgetRequest, BudgetResult, GroceryItem, PricedItem};
use utoipa::OpenApi;

const FAILURE_MESSAGE: &str = "An error occurred while analyzing your list. Please try again.";

/// Returns the router for /api/budget endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/evaluate", post(evaluate_budget))
}

/// Estimate the cost of a shopping list
///
/// Prices every item, flags items costing more than 20% of the budget and
/// reports whether the total fits. Stateless: nothing is stored.
#[utoipa::path(
    post,
    path = "/api/budget/evaluate",
    tag = "budget",
    request_body = BudgetRequest,
    responses(
        (status = 200, description = "Budget analysis", body = BudgetResult),
        (status = 400, description = "Invalid shopping list or budget", body = ValidationErrorResponse),
        (status = 503, description = "Price estimation unavailable", body = ErrorResponse)
    )
)]
pub async fn evaluate_budget(
    State(ctx): State<AppState>,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return body_rejection_response(rejection),
    };

    match evaluate(ctx.estimator.as_ref(), &ctx.policy.budget, &request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => flow_error_response(e, FAILURE_MESSAGE),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(evaluate_budget),
    components(schemas(BudgetRequest, BudgetResult, GroceryItem, PricedItem))
)]
pub struct ApiDoc;
