use thiserror::Error;

use crate::ai::AiError;

/// Caller error: the request never reaches the estimator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Budget must be at least ${minimum}.")]
    BudgetBelowMinimum { budget: f64, minimum: f64 },

    #[error("Please add at least one item.")]
    NoItems,

    #[error("Item name is required.")]
    EmptyItemName { index: usize },

    #[error("Quantity must be at least 1.")]
    QuantityBelowOne { index: usize, quantity: f64 },
}

impl ValidationError {
    /// Path of the offending field, e.g. `items[2].quantity`.
    pub fn field(&self) -> String {
        match self {
            Self::BudgetBelowMinimum { .. } => "budget".to_string(),
            Self::NoItems => "items".to_string(),
            Self::EmptyItemName { index } => format!("items[{}].name", index),
            Self::QuantityBelowOne { index, .. } => format!("items[{}].quantity", index),
        }
    }
}

/// Collaborator error: the estimation capability failed or answered badly.
#[derive(Error, Debug)]
pub enum EstimationError {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Malformed estimator response: {0}")]
    MalformedResponse(String),

    #[error("Invalid price {price} for {item}")]
    InvalidPrice { item: String, price: f64 },

    #[error("Estimated cost for {item} is out of range")]
    CostOverflow { item: String },

    #[error("Expected {min}-{max} recipes, got {got}")]
    RecipeCount { got: usize, min: usize, max: usize },

    #[error("Price table error: {0}")]
    PriceTable(String),
}

/// Error returned by both flows.
#[derive(Error, Debug)]
pub enum GroceryError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Estimation failed: {0}")]
    Estimation(#[from] EstimationError),
}

impl GroceryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
