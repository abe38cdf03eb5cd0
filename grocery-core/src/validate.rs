//! Input validation shared by both flows.
//!
//! Runs before the estimator is touched and reports the first offending field.

use crate::error::ValidationError;
use crate::policy::BudgetPolicy;
use crate::types::{BudgetRequest, GroceryItem, RecipeRequest};

pub fn validate_budget_request(
    request: &BudgetRequest,
    policy: &BudgetPolicy,
) -> Result<(), ValidationError> {
    // NaN fails this comparison too
    if !(request.budget.is_finite() && request.budget >= policy.min_budget) {
        return Err(ValidationError::BudgetBelowMinimum {
            budget: request.budget,
            minimum: policy.min_budget,
        });
    }

    if request.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    request
        .items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| validate_item(index, item))
}

pub fn validate_recipe_request(request: &RecipeRequest) -> Result<(), ValidationError> {
    if request.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    match request.items.iter().position(|name| name.trim().is_empty()) {
        Some(index) => Err(ValidationError::EmptyItemName { index }),
        None => Ok(()),
    }
}

fn validate_item(index: usize, item: &GroceryItem) -> Result<(), ValidationError> {
    if item.name.trim().is_empty() {
        return Err(ValidationError::EmptyItemName { index });
    }

    if !(item.quantity.is_finite() && item.quantity >= 1.0) {
        return Err(ValidationError::QuantityBelowOne {
            index,
            quantity: item.quantity,
        });
    }

    Ok(())
}
