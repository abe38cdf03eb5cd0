//! Deterministic estimator backed by a price table.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Estimator;
use crate::error::EstimationError;
use crate::policy::RecipePolicy;
use crate::types::Recipe;

/// On-disk price table.
///
/// ```json
/// {
///   "prices": { "Rice": 30.0, "Whole Milk (Gallon)": 4.29 },
///   "fallbackPrice": 2.5,
///   "recipes": [{ "title": "Fried Rice", "description": "...", "ingredientsUsed": ["Rice"] }]
/// }
/// ```
///
/// A flat `{ "Rice": 30.0 }` map is also accepted as a table with prices only.
/// Any other key is rejected rather than ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PriceTableFile {
    #[serde(default)]
    pub prices: HashMap<String, f64>,
    #[serde(default)]
    pub fallback_price: Option<f64>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceTableShape {
    Table(PriceTableFile),
    Flat(HashMap<String, f64>),
}

impl From<PriceTableShape> for PriceTableFile {
    fn from(shape: PriceTableShape) -> Self {
        match shape {
            PriceTableShape::Table(table) => table,
            PriceTableShape::Flat(prices) => Self {
                prices,
                ..Self::default()
            },
        }
    }
}

/// Looks prices up by item name (case-insensitive, surrounding whitespace
/// ignored) and counts every call it receives.
#[derive(Debug, Default)]
pub struct FixedEstimator {
    prices: HashMap<String, f64>,
    fallback_price: Option<f64>,
    recipes: Vec<Recipe>,
    calls: AtomicUsize,
}

const RECIPE_TEMPLATES: [(&str, &str); 3] = [
    ("{} Skillet", "A one-pan dinner built around {}."),
    ("{} Soup", "A simple, warming soup featuring {}."),
    ("{} Salad", "A quick fresh salad with {}."),
];

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl FixedEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, name: &str, price: f64) -> Self {
        self.prices.insert(normalize(name), price);
        self
    }

    /// Price used for items missing from the table.
    pub fn with_fallback_price(mut self, price: f64) -> Self {
        self.fallback_price = Some(price);
        self
    }

    /// Canned recipes returned verbatim by `suggest_recipes`.
    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn from_table(table: PriceTableFile) -> Self {
        Self {
            prices: table
                .prices
                .into_iter()
                .map(|(name, price)| (normalize(&name), price))
                .collect(),
            fallback_price: table.fallback_price,
            recipes: table.recipes,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, EstimationError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| EstimationError::PriceTable(format!("Invalid price table: {}", e)))?;
        let shape = PriceTableShape::deserialize(value).map_err(|_| {
            EstimationError::PriceTable(
                "Invalid price table: expected {\"prices\": {...}} or a flat {\"name\": price} map"
                    .to_string(),
            )
        })?;
        Ok(Self::from_table(shape.into()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EstimationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EstimationError::PriceTable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Number of estimator calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Deterministic suggestions when no canned recipes are configured:
    /// one template per recipe, each built around one or two of the items.
    fn template_recipes(items: &[String], policy: &RecipePolicy) -> Vec<Recipe> {
        let count = policy.max_recipes.min(RECIPE_TEMPLATES.len());

        (0..count)
            .map(|i| {
                let (title, description) = RECIPE_TEMPLATES[i];
                let main = items[i % items.len()].trim().to_string();
                let mut used = vec![main.clone()];
                if items.len() > 1 {
                    let side = items[(i + 1) % items.len()].trim().to_string();
                    if !side.eq_ignore_ascii_case(&main) {
                        used.push(side);
                    }
                }

                Recipe {
                    title: title.replace("{}", &main),
                    description: description.replace("{}", &used.join(" and ")),
                    ingredients_used: used,
                }
            })
            .collect()
    }
}

#[async_trait]
impl Estimator for FixedEstimator {
    async fn lookup_price(&self, item_name: &str) -> Result<f64, EstimationError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        self.prices
            .get(&normalize(item_name))
            .copied()
            .or(self.fallback_price)
            .ok_or_else(|| EstimationError::PriceTable(format!("No price for {}", item_name)))
    }

    async fn suggest_recipes(
        &self,
        items: &[String],
        policy: &RecipePolicy,
    ) -> Result<Vec<Recipe>, EstimationError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if !self.recipes.is_empty() {
            return Ok(self.recipes.clone());
        }
        if items.is_empty() {
            return Ok(vec![]);
        }
        Ok(Self::template_recipes(items, policy))
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let estimator = FixedEstimator::new().with_price("Rice", 30.0);

        assert_eq!(estimator.lookup_price("  rice ").await.unwrap(), 30.0);
        assert_eq!(estimator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_price_without_fallback() {
        let estimator = FixedEstimator::new();
        let err = estimator.lookup_price("Saffron").await.unwrap_err();
        assert!(matches!(err, EstimationError::PriceTable(_)));
    }

    #[tokio::test]
    async fn test_fallback_price() {
        let estimator = FixedEstimator::new().with_fallback_price(2.5);
        assert_eq!(estimator.lookup_price("Saffron").await.unwrap(), 2.5);
    }

    #[tokio::test]
    async fn test_from_json_str() {
        let estimator = FixedEstimator::from_json_str(
            r#"{"prices": {"Whole Milk (Gallon)": 4.29}, "fallbackPrice": 1.0}"#,
        )
        .unwrap();

        assert_eq!(
            estimator.lookup_price("whole milk (gallon)").await.unwrap(),
            4.29
        );
        assert_eq!(estimator.lookup_price("Bananas").await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_flat_price_map() {
        let estimator = FixedEstimator::from_json_str(r#"{"Rice": 30.0, "Onions": 2}"#).unwrap();

        assert_eq!(estimator.lookup_price("rice").await.unwrap(), 30.0);
        assert_eq!(estimator.lookup_price("Onions").await.unwrap(), 2.0);
    }

    #[test]
    fn test_misspelled_table_key_is_rejected() {
        let err = FixedEstimator::from_json_str(r#"{"price": {"Rice": 30.0}}"#).unwrap_err();
        assert!(matches!(err, EstimationError::PriceTable(_)));

        let err =
            FixedEstimator::from_json_str(r#"{"prices": {"Rice": 30.0}, "fallback": 1.0}"#)
                .unwrap_err();
        assert!(matches!(err, EstimationError::PriceTable(_)));
    }

    #[test]
    fn test_invalid_json_table() {
        let err = FixedEstimator::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, EstimationError::PriceTable(_)));
    }

    #[tokio::test]
    async fn test_template_recipes_use_given_items() {
        let estimator = FixedEstimator::new();
        let items = vec!["Rice".to_string(), "Onions".to_string()];

        let recipes = estimator
            .suggest_recipes(&items, &RecipePolicy::default())
            .await
            .unwrap();

        assert_eq!(recipes.len(), 3);
        assert_eq!(recipes[0].title, "Rice Skillet");
        assert_eq!(recipes[1].ingredients_used, vec!["Onions", "Rice"]);
        for recipe in &recipes {
            assert!(recipe.ingredients_used.iter().all(|i| items.contains(i)));
        }
    }

    #[tokio::test]
    async fn test_single_item_templates() {
        let estimator = FixedEstimator::new();
        let recipes = estimator
            .suggest_recipes(&["Lentils".to_string()], &RecipePolicy::default())
            .await
            .unwrap();

        assert!(recipes
            .iter()
            .all(|r| r.ingredients_used == vec!["Lentils".to_string()]));
    }
}
