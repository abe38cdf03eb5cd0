//! Price lookup prompt: one grocery item in, one unit price out.

/// Prompt name for cache keys.
pub const PRICE_LOOKUP_PROMPT_NAME: &str = "price_lookup";

/// System prompt shared by every price lookup.
pub const PRICE_LOOKUP_SYSTEM_PROMPT: &str = r#"You are a helpful shopping assistant that knows current grocery store prices.
Given the name of a single grocery item, estimate the typical retail price in US dollars for ONE unit of it as it would normally be sold (one package, one piece, or the size stated in the name).

Rules:
- The price must be a non-negative number, not a range and not a string.
- Do not multiply by any quantity; quantities are handled by the caller.

Respond with JSON only, no other text: {"price": 3.49}"#;

/// Render the user message for a price lookup.
pub fn render_price_lookup_prompt(item_name: &str) -> String {
    format!("Grocery item: {item_name}", item_name = item_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_price_lookup_prompt("  Whole Milk (Gallon) ");
        assert_eq!(prompt, "Grocery item: Whole Milk (Gallon)");
    }

    #[test]
    fn test_system_prompt_asks_for_json_price() {
        assert!(PRICE_LOOKUP_SYSTEM_PROMPT.contains(r#"{"price": 3.49}"#));
        assert!(PRICE_LOOKUP_SYSTEM_PROMPT.contains("non-negative"));
    }
}
