//! AI prompt templates.

pub mod price_lookup;
pub mod recipe_suggestion;

pub use price_lookup::{
    render_price_lookup_prompt, PRICE_LOOKUP_PROMPT_NAME, PRICE_LOOKUP_SYSTEM_PROMPT,
};
pub use recipe_suggestion::{
    render_recipe_suggestion_prompt, render_recipe_suggestion_system_prompt,
    RECIPE_SUGGESTION_PROMPT_NAME,
};
