mod render;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use grocery_core::ai::{AiCache, AiConfig};
use grocery_core::{
    create_estimator_from_env, evaluate, suggest, BudgetRequest, Estimator, FixedEstimator,
    GroceryError, GroceryItem, Policy, RecipeRequest,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "grocery")]
#[command(about = "Grocery budget assistant CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the cost of a shopping list against a budget
    Evaluate {
        /// Budget in dollars
        #[arg(long)]
        budget: f64,
        /// Item as "name" or "name:quantity" (repeatable)
        #[arg(long = "item", required = true, value_parser = parse_item)]
        items: Vec<GroceryItem>,
        /// JSON price table to use instead of the AI estimator
        #[arg(long)]
        prices: Option<PathBuf>,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Suggest recipes that use the given items
    Suggest {
        /// Item name (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// JSON price table (and canned recipes) to use instead of the AI estimator
        #[arg(long)]
        prices: Option<PathBuf>,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Ping the server (unauthenticated)
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Inspect or clear the AI response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show how many responses are cached
    Stats,
    /// Delete every cached response
    Clear,
}

/// Parse "Avocados:4" into an item; a missing or non-numeric suffix means quantity 1.
fn parse_item(raw: &str) -> Result<GroceryItem, String> {
    let (name, quantity) = match raw.rsplit_once(':') {
        Some((name, qty)) => match qty.trim().parse::<f64>() {
            Ok(quantity) => (name, quantity),
            Err(_) => (raw, 1.0),
        },
        None => (raw, 1.0),
    };
    Ok(GroceryItem::new(name.trim(), quantity))
}

fn load_estimator(prices: Option<PathBuf>) -> Result<Arc<dyn Estimator>> {
    match prices {
        Some(path) => Ok(Arc::new(
            FixedEstimator::from_json_file(&path)
                .with_context(|| format!("Failed to load price table {}", path.display()))?,
        )),
        None => create_estimator_from_env().context("Failed to configure estimator"),
    }
}

/// Turn a flow error into the message a user should see.
fn user_facing(error: GroceryError, failure_message: &str) -> anyhow::Error {
    match error {
        GroceryError::Validation(e) => anyhow!("{}: {}", e.field(), e),
        GroceryError::Estimation(e) => {
            tracing::warn!("Estimation failed: {}", e);
            anyhow!("{}", failure_message)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = Policy::from_env();

    match cli.command {
        Commands::Evaluate {
            budget,
            items,
            prices,
            json,
        } => {
            let estimator = load_estimator(prices)?;
            let request = BudgetRequest { items, budget };
            let result = evaluate(estimator.as_ref(), &policy.budget, &request)
                .await
                .map_err(|e| {
                    user_facing(
                        e,
                        "An error occurred while analyzing your list. Please try again.",
                    )
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::budget_report(&result, budget));
            }
        }
        Commands::Suggest {
            items,
            prices,
            json,
        } => {
            let estimator = load_estimator(prices)?;
            let request = RecipeRequest { items };
            let result = suggest(estimator.as_ref(), &policy.recipes, &request)
                .await
                .map_err(|e| {
                    user_facing(
                        e,
                        "An error occurred while suggesting recipes. Please try again.",
                    )
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::recipe_report(&result));
            }
        }
        Commands::Ping { server } => {
            ping(&server).await?;
        }
        Commands::Cache { action } => {
            let cache = AiCache::new(
                AiConfig::from_env()
                    .map(|c| c.cache_dir)
                    .unwrap_or_else(|_| AiConfig::default_cache_dir()),
            );
            match action {
                CacheAction::Stats => {
                    let stats = cache.stats();
                    println!(
                        "{} cached responses in {}",
                        stats.cached_responses,
                        cache.dir().display()
                    );
                }
                CacheAction::Clear => {
                    cache
                        .clear()
                        .with_context(|| format!("Failed to clear {}", cache.dir().display()))?;
                    println!("Cleared {}", cache.dir().display());
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    message: String,
}

async fn ping(server: &str) -> Result<()> {
    let url = format!("{}/api/test/unauthed-ping", server.trim_end_matches('/'));

    let response: PingResponse = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()?
        .json()
        .await?;

    println!("{}", response.message);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_with_quantity() {
        assert_eq!(parse_item("Avocados:4").unwrap(), GroceryItem::new("Avocados", 4.0));
        assert_eq!(parse_item("Flour : 1.5").unwrap(), GroceryItem::new("Flour", 1.5));
    }

    #[test]
    fn test_parse_item_without_quantity() {
        assert_eq!(parse_item("Rice").unwrap(), GroceryItem::new("Rice", 1.0));
        assert_eq!(
            parse_item("Ratio 2:1 Mix").unwrap(),
            GroceryItem::new("Ratio 2:1 Mix", 1.0)
        );
    }

    #[test]
    fn test_cli_parses_evaluate() {
        let cli = Cli::try_parse_from([
            "grocery", "evaluate", "--budget", "100", "--item", "Rice:2", "--item", "Milk",
        ])
        .unwrap();

        match cli.command {
            Commands::Evaluate { budget, items, .. } => {
                assert_eq!(budget, 100.0);
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].quantity, 2.0);
            }
            _ => panic!("expected evaluate"),
        }
    }
}
