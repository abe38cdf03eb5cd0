//! Estimation capability: per-item prices and recipe ideas.
//!
//! The flows only see the [`Estimator`] trait, so the model-backed
//! implementation can be swapped for a deterministic price table in tests
//! or offline use.

mod ai;
mod fixed;

pub use ai::AiEstimator;
pub use fixed::{FixedEstimator, PriceTableFile};

use async_trait::async_trait;
use std::sync::Arc;

use crate::ai::CachingAiClient;
use crate::error::EstimationError;
use crate::policy::RecipePolicy;
use crate::types::Recipe;

#[async_trait]
pub trait Estimator: Send + Sync {
    /// Estimated price of one unit of the named item.
    ///
    /// Implementations may be non-deterministic; callers must not assume two
    /// lookups of the same name agree.
    async fn lookup_price(&self, item_name: &str) -> Result<f64, EstimationError>;

    /// Raw recipe ideas for the given item names. The caller normalizes
    /// ingredient names and enforces the recipe count.
    async fn suggest_recipes(
        &self,
        items: &[String],
        policy: &RecipePolicy,
    ) -> Result<Vec<Recipe>, EstimationError>;

    /// Short name for logs ("ai", "fixed").
    fn name(&self) -> &'static str;
}

/// Build the estimator selected by the environment.
///
/// - `GROCERY_ESTIMATOR`: "ai" | "fixed" (default: "ai")
/// - `GROCERY_PRICE_TABLE`: JSON price file, required for "fixed"
///
/// The "ai" estimator reads its client settings via [`crate::ai::AiConfig::from_env`].
pub fn create_estimator_from_env() -> Result<Arc<dyn Estimator>, EstimationError> {
    let kind = std::env::var("GROCERY_ESTIMATOR").unwrap_or_else(|_| "ai".to_string());

    match kind.as_str() {
        "ai" => {
            let client = CachingAiClient::from_env()?;
            Ok(Arc::new(AiEstimator::new(Arc::new(client))))
        }
        "fixed" => {
            let path = std::env::var("GROCERY_PRICE_TABLE").map_err(|_| {
                EstimationError::PriceTable("GROCERY_PRICE_TABLE not set".to_string())
            })?;
            Ok(Arc::new(FixedEstimator::from_json_file(path)?))
        }
        other => Err(EstimationError::PriceTable(format!(
            "Unknown estimator: {}",
            other
        ))),
    }
}
