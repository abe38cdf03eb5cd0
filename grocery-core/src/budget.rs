//! Budget evaluation: price every item, total the list, flag expensive lines.

use crate::error::{EstimationError, GroceryError};
use crate::estimator::Estimator;
use crate::policy::BudgetPolicy;
use crate::types::{BudgetRequest, BudgetResult, PricedItem};
use crate::validate::validate_budget_request;

/// Evaluate a shopping list against its budget.
///
/// Each item is priced with exactly one estimator call, in list order, and
/// its line cost is `quantity * unit price`. An item is expensive when its
/// line cost is strictly above `policy.expensive_share * budget`.
/// `within_budget` is computed here from the total, never taken from the
/// estimator. A total that is no longer finite fails with
/// [`EstimationError::CostOverflow`].
pub async fn evaluate(
    estimator: &dyn Estimator,
    policy: &BudgetPolicy,
    request: &BudgetRequest,
) -> Result<BudgetResult, GroceryError> {
    validate_budget_request(request, policy)?;

    let threshold = policy.expensive_threshold(request.budget);
    let mut total = 0.0;
    let mut expensive_items = Vec::new();

    for item in &request.items {
        let unit_price = estimator.lookup_price(&item.name).await?;
        if !(unit_price.is_finite() && unit_price >= 0.0) {
            return Err(EstimationError::InvalidPrice {
                item: item.name.clone(),
                price: unit_price,
            }
            .into());
        }

        let line_cost = item.quantity * unit_price;
        total += line_cost;
        if !total.is_finite() {
            return Err(EstimationError::CostOverflow {
                item: item.name.clone(),
            }
            .into());
        }

        tracing::debug!(
            item = %item.name,
            quantity = item.quantity,
            unit_price,
            line_cost,
            "Priced item"
        );

        if line_cost > threshold {
            expensive_items.push(PricedItem {
                name: item.name.clone(),
                estimated_price: line_cost,
            });
        }
    }

    let within_budget = total <= request.budget;

    tracing::info!(
        estimator = estimator.name(),
        items = request.items.len(),
        budget = request.budget,
        estimated_total = total,
        expensive = expensive_items.len(),
        within_budget,
        "Budget evaluated"
    );

    Ok(BudgetResult {
        estimated_total_cost: total,
        expensive_items,
        within_budget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::FixedEstimator;
    use crate::types::GroceryItem;

    fn rice_request(budget: f64) -> BudgetRequest {
        BudgetRequest {
            items: vec![GroceryItem::new("Rice", 2.0)],
            budget,
        }
    }

    #[tokio::test]
    async fn test_rice_within_budget() {
        let estimator = FixedEstimator::new().with_price("Rice", 30.0);

        let result = evaluate(&estimator, &BudgetPolicy::default(), &rice_request(100.0))
            .await
            .unwrap();

        assert_eq!(result.estimated_total_cost, 60.0);
        assert_eq!(
            result.expensive_items,
            vec![PricedItem {
                name: "Rice".to_string(),
                estimated_price: 60.0
            }]
        );
        assert!(result.within_budget);
    }

    #[tokio::test]
    async fn test_rice_over_budget() {
        let estimator = FixedEstimator::new().with_price("Rice", 30.0);

        let result = evaluate(&estimator, &BudgetPolicy::default(), &rice_request(50.0))
            .await
            .unwrap();

        assert_eq!(result.estimated_total_cost, 60.0);
        assert!(!result.within_budget);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        // 20 is exactly 20% of 100: not expensive
        let estimator = FixedEstimator::new()
            .with_price("Eggs", 20.0)
            .with_price("Cheese", 20.01);
        let request = BudgetRequest {
            items: vec![GroceryItem::new("Eggs", 1.0), GroceryItem::new("Cheese", 1.0)],
            budget: 100.0,
        };

        let result = evaluate(&estimator, &BudgetPolicy::default(), &request)
            .await
            .unwrap();

        assert_eq!(result.expensive_items.len(), 1);
        assert_eq!(result.expensive_items[0].name, "Cheese");
    }

    #[tokio::test]
    async fn test_total_equal_to_budget_is_within() {
        let estimator = FixedEstimator::new().with_price("Rice", 25.0);
        let result = evaluate(&estimator, &BudgetPolicy::default(), &rice_request(50.0))
            .await
            .unwrap();
        assert!(result.within_budget);
    }

    #[tokio::test]
    async fn test_duplicate_names_looked_up_each_time() {
        let estimator = FixedEstimator::new().with_price("Rice", 1.0);
        let request = BudgetRequest {
            items: vec![GroceryItem::new("Rice", 1.0), GroceryItem::new("rice", 3.0)],
            budget: 100.0,
        };

        let result = evaluate(&estimator, &BudgetPolicy::default(), &request)
            .await
            .unwrap();

        assert_eq!(result.estimated_total_cost, 4.0);
        assert_eq!(estimator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_negative_price_is_estimation_failure() {
        let estimator = FixedEstimator::new().with_price("Rice", -1.0);

        let err = evaluate(&estimator, &BudgetPolicy::default(), &rice_request(100.0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GroceryError::Estimation(EstimationError::InvalidPrice { .. })
        ));
    }

    #[tokio::test]
    async fn test_huge_quantity_is_not_a_result() {
        let estimator = FixedEstimator::new().with_price("Rice", 30.0);
        let request = BudgetRequest {
            items: vec![GroceryItem::new("Rice", 1e308)],
            budget: 100.0,
        };

        let err = evaluate(&estimator, &BudgetPolicy::default(), &request)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GroceryError::Estimation(EstimationError::CostOverflow { ref item }) if item == "Rice"
        ));
    }

    #[tokio::test]
    async fn test_total_overflow_across_lines() {
        let estimator = FixedEstimator::new().with_price("Gold", 1e308);
        let request = BudgetRequest {
            items: vec![GroceryItem::new("Gold", 1.0), GroceryItem::new("Gold", 1.0)],
            budget: 100.0,
        };

        let err = evaluate(&estimator, &BudgetPolicy::default(), &request)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GroceryError::Estimation(EstimationError::CostOverflow { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_request_skips_estimator() {
        let estimator = FixedEstimator::new().with_fallback_price(1.0);

        let err = evaluate(&estimator, &BudgetPolicy::default(), &rice_request(0.0))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(estimator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_share() {
        let estimator = FixedEstimator::new().with_price("Rice", 30.0);
        let policy = BudgetPolicy {
            expensive_share: 0.75,
            ..BudgetPolicy::default()
        };

        let result = evaluate(&estimator, &policy, &rice_request(100.0))
            .await
            .unwrap();

        assert!(result.expensive_items.is_empty());
    }
}
