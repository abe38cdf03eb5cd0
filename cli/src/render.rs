//! Plain-text rendering of flow results.

use grocery_core::{BudgetResult, RecipeResult};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn budget_report(result: &BudgetResult, budget: f64) -> String {
    let mut out = String::new();
    let status = if result.within_budget {
        "WITHIN BUDGET"
    } else {
        "OVER BUDGET"
    };

    let _ = writeln!(out, "Budget status: {}", status);
    let _ = writeln!(
        out,
        "${:.2} out of ${:.2} budget",
        result.estimated_total_cost, budget
    );
    let _ = writeln!(out, "{}", progress_bar(result.percent_of_budget(budget)));

    let remaining = result.remaining(budget);
    if result.within_budget {
        let _ = writeln!(out, "You're within budget! You have ${:.2} left.", remaining);
    } else {
        let _ = writeln!(out, "You're over budget by ${:.2}.", -remaining);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Pricey picks:");
    if result.expensive_items.is_empty() {
        let _ = writeln!(out, "  No particularly expensive items found. Good job!");
    } else {
        for item in &result.expensive_items {
            let _ = writeln!(out, "  {:<30} ${:>8.2}", item.name, item.estimated_price);
        }
    }

    out
}

pub fn recipe_report(result: &RecipeResult) -> String {
    let mut out = String::new();

    for (i, recipe) in result.recipes.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{}. {}", i + 1, recipe.title);
        if !recipe.description.is_empty() {
            let _ = writeln!(out, "   {}", recipe.description);
        }
        let _ = writeln!(out, "   Uses: {}", recipe.ingredients_used.join(", "));
    }

    out
}

fn progress_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_core::{PricedItem, Recipe};

    #[test]
    fn test_within_budget_report() {
        let result = BudgetResult {
            estimated_total_cost: 60.0,
            expensive_items: vec![PricedItem {
                name: "Rice".to_string(),
                estimated_price: 60.0,
            }],
            within_budget: true,
        };

        let report = budget_report(&result, 100.0);

        assert!(report.contains("WITHIN BUDGET"));
        assert!(report.contains("$60.00 out of $100.00 budget"));
        assert!(report.contains("You have $40.00 left."));
        assert!(report.contains("Rice"));
        assert!(report.contains("60%"));
    }

    #[test]
    fn test_over_budget_report() {
        let result = BudgetResult {
            estimated_total_cost: 60.0,
            expensive_items: vec![],
            within_budget: false,
        };

        let report = budget_report(&result, 50.0);

        assert!(report.contains("OVER BUDGET"));
        assert!(report.contains("over budget by $10.00."));
        assert!(report.contains("No particularly expensive items found."));
        assert!(report.contains(&format!("[{}] 120%", "#".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_recipe_report() {
        let result = RecipeResult {
            recipes: vec![
                Recipe {
                    title: "Fried Rice".to_string(),
                    description: "Savory".to_string(),
                    ingredients_used: vec!["Rice".to_string(), "Onions".to_string()],
                },
                Recipe {
                    title: "Rice Pudding".to_string(),
                    description: String::new(),
                    ingredients_used: vec!["Rice".to_string()],
                },
            ],
        };

        let report = recipe_report(&result);

        assert!(report.starts_with("1. Fried Rice\n   Savory\n   Uses: Rice, Onions\n"));
        assert!(report.contains("2. Rice Pudding\n   Uses: Rice\n"));
    }
}
