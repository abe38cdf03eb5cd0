//! Recipe suggestions for a list of item names.

use crate::error::{EstimationError, GroceryError};
use crate::estimator::Estimator;
use crate::policy::RecipePolicy;
use crate::types::{Recipe, RecipeRequest, RecipeResult};
use crate::validate::validate_recipe_request;

/// Ask the estimator for recipe ideas and keep only well-formed ones.
///
/// Ingredients are matched against the requested names ignoring case and
/// surrounding whitespace and rewritten to the caller's spelling. Recipes
/// left without ingredients or with a repeated title are dropped. Fails when
/// fewer than `policy.min_recipes` survive; extras beyond
/// `policy.max_recipes` are cut.
pub async fn suggest(
    estimator: &dyn Estimator,
    policy: &RecipePolicy,
    request: &RecipeRequest,
) -> Result<RecipeResult, GroceryError> {
    validate_recipe_request(request)?;

    let suggested = estimator.suggest_recipes(&request.items, policy).await?;
    let offered = suggested.len();
    let recipes = normalize_recipes(suggested, &request.items, policy.max_recipes);

    if recipes.len() < policy.min_recipes {
        tracing::warn!(
            estimator = estimator.name(),
            offered,
            usable = recipes.len(),
            "Too few usable recipe suggestions"
        );
        return Err(EstimationError::RecipeCount {
            got: recipes.len(),
            min: policy.min_recipes,
            max: policy.max_recipes,
        }
        .into());
    }

    tracing::info!(
        estimator = estimator.name(),
        items = request.items.len(),
        offered,
        recipes = recipes.len(),
        "Recipes suggested"
    );

    Ok(RecipeResult { recipes })
}

fn normalize_recipes(suggested: Vec<Recipe>, items: &[String], max: usize) -> Vec<Recipe> {
    let mut recipes: Vec<Recipe> = Vec::new();

    for recipe in suggested {
        let title = recipe.title.trim();
        if title.is_empty()
            || recipes
                .iter()
                .any(|kept| kept.title.eq_ignore_ascii_case(title))
        {
            continue;
        }

        let mut used: Vec<String> = Vec::new();
        for ingredient in &recipe.ingredients_used {
            let Some(item) = match_item(ingredient, items) else {
                tracing::debug!(ingredient = %ingredient, "Dropping ingredient not in the list");
                continue;
            };
            if !used.contains(item) {
                used.push(item.clone());
            }
        }
        if used.is_empty() {
            continue;
        }

        recipes.push(Recipe {
            title: title.to_string(),
            description: recipe.description.trim().to_string(),
            ingredients_used: used,
        });

        if recipes.len() == max {
            break;
        }
    }

    recipes
}

fn match_item<'a>(ingredient: &str, items: &'a [String]) -> Option<&'a String> {
    let wanted = ingredient.trim().to_lowercase();
    items.iter().find(|item| item.trim().to_lowercase() == wanted)
}
