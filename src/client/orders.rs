//! Order screen view data.
//!
//! Estimates come from the server; this module only formats them.

use super::ApiClient;
use crate::core::order::{IngredientRequirement, OrderView};
use tracing::warn;

/// Shown when the order list cannot be fetched
pub const ORDERS_BANNER: &str = "Failed to load orders. Please try again later.";

/// One line of an order as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    /// Recipe name, or a placeholder when the recipe is gone
    pub recipe: String,
    /// Units ordered
    pub quantity: u32,
    /// Formatted line cost
    pub cost: String,
    /// Formatted ingredient needs, e.g. `Beef: 2.00 kg`
    pub ingredients: Vec<String>,
}

/// One order as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCard {
    /// Order id
    pub id: i64,
    /// Who ordered
    pub customer: String,
    /// Delivery date, `YYYY-MM-DD`
    pub delivery_date: String,
    /// Status label
    pub status: String,
    /// Line rows
    pub rows: Vec<OrderRow>,
    /// Formatted order total
    pub total: String,
    /// Formatted ingredient needs of the whole order
    pub ingredients: Vec<String>,
}

/// Formats a money amount with two decimals and thousands separators,
/// e.g. `$1,234.50`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round();
    let whole = format!("{:.0}", (cents / 100.0).trunc());
    let fraction = cents % 100.0;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02.0}")
}

fn format_requirement(requirement: &IngredientRequirement) -> String {
    format!(
        "{}: {:.2} {}",
        requirement.name, requirement.required, requirement.unit
    )
}

/// Builds the card for one order.
#[must_use]
pub fn order_card(order: &OrderView) -> OrderCard {
    let rows = order
        .items
        .iter()
        .map(|item| match &item.current_estimates {
            Some(estimate) => OrderRow {
                recipe: estimate.name.clone(),
                quantity: item.quantity,
                cost: format_currency(estimate.total_cost),
                ingredients: estimate.ingredients.iter().map(format_requirement).collect(),
            },
            None => OrderRow {
                recipe: format!("Unknown recipe #{}", item.recipe_id),
                quantity: item.quantity,
                cost: "n/a".to_string(),
                ingredients: Vec::new(),
            },
        })
        .collect();

    OrderCard {
        id: order.id,
        customer: order.customer_name.clone(),
        delivery_date: order.delivery_date.format("%Y-%m-%d").to_string(),
        status: order.status.to_string(),
        rows,
        total: format_currency(order.total_cost),
        ingredients: order
            .ingredient_requirements
            .iter()
            .map(format_requirement)
            .collect(),
    }
}

/// The order screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBoard {
    /// Cards in delivery order
    pub cards: Vec<OrderCard>,
    /// Set when the last fetch failed
    pub banner: Option<String>,
}

impl OrderBoard {
    /// Fetches the orders; a failure leaves the board empty with a banner.
    pub async fn load(client: &ApiClient) -> Self {
        match client.list_orders().await {
            Ok(orders) => Self {
                cards: orders.iter().map(order_card).collect(),
                banner: None,
            },
            Err(err) => {
                warn!("Failed to load orders: {}", err);
                Self {
                    cards: Vec::new(),
                    banner: Some(ORDERS_BANNER.to_string()),
                }
            }
        }
    }
}
