pub mod ai;
pub mod budget;
pub mod error;
pub mod estimator;
pub mod policy;
pub mod recipes;
pub mod types;
pub mod validate;

pub use budget::evaluate;
pub use error::{EstimationError, GroceryError, ValidationError};
pub use estimator::{create_estimator_from_env, AiEstimator, Estimator, FixedEstimator};
pub use policy::{BudgetPolicy, Policy, RecipePolicy};
pub use recipes::suggest;
pub use types::{
    BudgetRequest, BudgetResult, GroceryItem, PricedItem, Recipe, RecipeRequest, RecipeResult,
};
