//! Request and result types for both flows.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GroceryItem {
    pub name: String,
    /// Fractional quantities (e.g. 1.5 kg) are allowed; must be at least 1.
    pub quantity: f64,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Input to the budget evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BudgetRequest {
    pub items: Vec<GroceryItem>,
    pub budget: f64,
}

/// An item flagged as expensive, with its line cost (quantity times unit price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub name: String,
    pub estimated_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub estimated_total_cost: f64,
    pub expensive_items: Vec<PricedItem>,
    pub within_budget: bool,
}

impl BudgetResult {
    /// Money left after the estimated total; negative when over budget.
    pub fn remaining(&self, budget: f64) -> f64 {
        budget - self.estimated_total_cost
    }

    /// Share of the budget consumed, as a percentage (may exceed 100).
    pub fn percent_of_budget(&self, budget: f64) -> f64 {
        if budget > 0.0 {
            self.estimated_total_cost / budget * 100.0
        } else {
            0.0
        }
    }
}

/// Input to the recipe suggester: item names only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeRequest {
    pub items: Vec<String>,
}

impl From<&BudgetRequest> for RecipeRequest {
    fn from(request: &BudgetRequest) -> Self {
        Self {
            items: request.items.iter().map(|i| i.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Names drawn from the request's item list, in the caller's spelling.
    #[serde(default, alias = "ingredients_used")]
    pub ingredients_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeResult {
    pub recipes: Vec<Recipe>,
}
