//! Policy constants for both flows, overridable from the environment.

use std::env;
use std::str::FromStr;

/// An item is expensive when its line cost exceeds this share of the budget.
pub const EXPENSIVE_ITEM_SHARE: f64 = 0.20;

/// Smallest budget accepted by the validator.
pub const MIN_BUDGET: f64 = 1.0;

pub const MIN_RECIPES: usize = 2;
pub const MAX_RECIPES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetPolicy {
    pub expensive_share: f64,
    pub min_budget: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            expensive_share: EXPENSIVE_ITEM_SHARE,
            min_budget: MIN_BUDGET,
        }
    }
}

impl BudgetPolicy {
    /// Line cost above which an item is flagged for the given budget.
    pub fn expensive_threshold(&self, budget: f64) -> f64 {
        self.expensive_share * budget
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipePolicy {
    pub min_recipes: usize,
    pub max_recipes: usize,
}

impl Default for RecipePolicy {
    fn default() -> Self {
        Self {
            min_recipes: MIN_RECIPES,
            max_recipes: MAX_RECIPES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Policy {
    pub budget: BudgetPolicy,
    pub recipes: RecipePolicy,
}

impl Policy {
    /// Load policy overrides from environment variables.
    ///
    /// - `GROCERY_EXPENSIVE_SHARE`: share in (0, 1] (default: 0.20)
    /// - `GROCERY_MIN_BUDGET`: positive number (default: 1.0)
    /// - `GROCERY_MIN_RECIPES` / `GROCERY_MAX_RECIPES`: 1 <= min <= max (default: 2 / 3)
    ///
    /// Unparseable or out-of-range values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let expensive_share = parse_env("GROCERY_EXPENSIVE_SHARE", |v: &f64| *v > 0.0 && *v <= 1.0)
            .unwrap_or(defaults.budget.expensive_share);
        let min_budget = parse_env("GROCERY_MIN_BUDGET", |v: &f64| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.budget.min_budget);

        let mut recipes = RecipePolicy {
            min_recipes: parse_env("GROCERY_MIN_RECIPES", |v: &usize| *v >= 1)
                .unwrap_or(defaults.recipes.min_recipes),
            max_recipes: parse_env("GROCERY_MAX_RECIPES", |v: &usize| *v >= 1)
                .unwrap_or(defaults.recipes.max_recipes),
        };
        if recipes.min_recipes > recipes.max_recipes {
            tracing::warn!(
                min = recipes.min_recipes,
                max = recipes.max_recipes,
                "Recipe bounds are inverted, using defaults"
            );
            recipes = defaults.recipes;
        }

        Self {
            budget: BudgetPolicy {
                expensive_share,
                min_budget,
            },
            recipes,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, valid: impl Fn(&T) -> bool) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            tracing::warn!(var = name, value = %raw, "Ignoring invalid policy override");
            None
        }
    }
}
