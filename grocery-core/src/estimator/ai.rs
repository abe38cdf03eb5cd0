//! Model-backed estimator: one chat completion per lookup.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::Estimator;
use crate::ai::prompts::price_lookup::{
    render_price_lookup_prompt, PRICE_LOOKUP_PROMPT_NAME, PRICE_LOOKUP_SYSTEM_PROMPT,
};
use crate::ai::prompts::recipe_suggestion::{
    render_recipe_suggestion_prompt, render_recipe_suggestion_system_prompt,
    RECIPE_SUGGESTION_PROMPT_NAME,
};
use crate::ai::{AiClient, ChatRequest};
use crate::error::EstimationError;
use crate::policy::RecipePolicy;
use crate::types::Recipe;

/// Response format from the price lookup prompt.
#[derive(Debug, Deserialize)]
struct PriceLookupResponse {
    price: f64,
}

/// Response format from the recipe suggestion prompt.
#[derive(Debug, Deserialize)]
struct RecipeSuggestionResponse {
    recipes: Vec<Recipe>,
}

pub struct AiEstimator {
    client: Arc<dyn AiClient>,
}

impl AiEstimator {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Estimator for AiEstimator {
    async fn lookup_price(&self, item_name: &str) -> Result<f64, EstimationError> {
        let request = ChatRequest::json(
            PRICE_LOOKUP_SYSTEM_PROMPT,
            render_price_lookup_prompt(item_name),
            64,
            0.2,
        );

        let response = self
            .client
            .complete(PRICE_LOOKUP_PROMPT_NAME, request)
            .await?;

        tracing::debug!(
            item = item_name,
            cached = response.cached,
            tokens = response.usage.total_tokens,
            "Price lookup answered"
        );

        let parsed: PriceLookupResponse = serde_json::from_str(&response.content).map_err(|e| {
            EstimationError::MalformedResponse(format!(
                "Failed to parse price for {}: {}",
                item_name, e
            ))
        })?;

        Ok(parsed.price)
    }

    async fn suggest_recipes(
        &self,
        items: &[String],
        policy: &RecipePolicy,
    ) -> Result<Vec<Recipe>, EstimationError> {
        let request = ChatRequest::json(
            render_recipe_suggestion_system_prompt(policy.min_recipes, policy.max_recipes),
            render_recipe_suggestion_prompt(items),
            1024,
            0.7,
        );

        let response = self
            .client
            .complete(RECIPE_SUGGESTION_PROMPT_NAME, request)
            .await?;

        tracing::debug!(
            cached = response.cached,
            tokens = response.usage.total_tokens,
            "Recipe suggestion answered"
        );

        let parsed: RecipeSuggestionResponse =
            serde_json::from_str(&response.content).map_err(|e| {
                EstimationError::MalformedResponse(format!(
                    "Failed to parse recipe suggestions: {}",
                    e
                ))
            })?;

        Ok(parsed.recipes)
    }

    fn name(&self) -> &'static str {
        "ai"
    }
}
