//! Recipe suggestion prompt built from the caller's item names.

/// Prompt name for cache keys.
pub const RECIPE_SUGGESTION_PROMPT_NAME: &str = "recipe_suggestion";

/// Render the system prompt. The recipe count bounds come from policy.
pub fn render_recipe_suggestion_system_prompt(min_recipes: usize, max_recipes: usize) -> String {
    format!(
        r#"You are a creative chef who suggests simple and delicious recipes.
Based on the list of available grocery items, suggest {min_recipes}-{max_recipes} distinct recipes.
For each recipe, provide a title, a short description, and a list of which of the *provided ingredients* are used in the recipe.

IMPORTANT: Only list ingredients exactly as they appear in the provided list. Every recipe must use at least one of them.

Respond with JSON only, no other text: {{"recipes": [{{"title": "string", "description": "string", "ingredientsUsed": ["item"]}}]}}"#,
        min_recipes = min_recipes,
        max_recipes = max_recipes
    )
}

/// Render the user message listing the available items.
pub fn render_recipe_suggestion_prompt(items: &[String]) -> String {
    let list = items
        .iter()
        .map(|item| format!("- {}", item.trim()))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Available items:\n{list}", list = list)
}
