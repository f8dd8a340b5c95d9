//! Order business logic - creation, status changes and read-time estimates.
//!
//! Cost and ingredient figures are never stored with an order. Every read
//! resolves the order's lines against the current recipes:
//!
//! - per line, `total_cost = cost_per_unit × quantity` and each ingredient's
//!   `required = quantity_per_unit × quantity`;
//! - per order, the line costs are summed and ingredient requirements are
//!   summed per (name, unit) across lines.
//!
//! A line whose recipe has been removed gets no estimate and adds nothing.

use crate::{
    core::recipe::recipes_by_id,
    entities::{Order, OrderStatus, order, order::OrderLine, order::OrderLines, recipe},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Input for creating an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Who ordered
    pub customer_name: String,
    /// Date the order was placed
    pub order_date: NaiveDate,
    /// Date the order is due
    pub delivery_date: NaiveDate,
    /// Ordered recipes
    pub items: Vec<OrderLine>,
}

/// Amount of one ingredient needed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequirement {
    /// Ingredient name
    pub name: String,
    /// Unit of `required`
    pub unit: String,
    /// Quantity needed
    pub required: f64,
}

/// Estimate for one order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEstimate {
    /// Recipe name
    pub name: String,
    /// Units ordered
    pub quantity: u32,
    /// Cost of the line at current prices
    pub total_cost: f64,
    /// Ingredients the line consumes
    pub ingredients: Vec<IngredientRequirement>,
}

/// An order line with its estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    /// Referenced recipe
    pub recipe_id: i64,
    /// Units ordered
    pub quantity: u32,
    /// Absent when the recipe no longer exists
    pub current_estimates: Option<LineEstimate>,
}

/// An order as served to clients, estimates included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    /// Order id
    pub id: i64,
    /// Who ordered
    pub customer_name: String,
    /// Date the order was placed
    pub order_date: NaiveDate,
    /// Date the order is due
    pub delivery_date: NaiveDate,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Lines with estimates
    pub items: Vec<OrderItemView>,
    /// Sum of the line costs
    pub total_cost: f64,
    /// Ingredient needs summed across lines, sorted by name then unit
    pub ingredient_requirements: Vec<IngredientRequirement>,
}

/// Estimates one line against its recipe.
#[must_use]
pub fn estimate_line(recipe: &recipe::Model, quantity: u32) -> LineEstimate {
    let units = f64::from(quantity);
    LineEstimate {
        name: recipe.name.clone(),
        quantity,
        total_cost: recipe.cost_per_unit() * units,
        ingredients: recipe
            .ingredients
            .0
            .iter()
            .map(|ingredient| IngredientRequirement {
                name: ingredient.name.clone(),
                unit: ingredient.unit.clone(),
                required: ingredient.quantity * units,
            })
            .collect(),
    }
}

/// Builds the client view of an order from the given recipes.
#[must_use]
pub fn estimate_order(order: order::Model, recipes: &HashMap<i64, recipe::Model>) -> OrderView {
    let items: Vec<OrderItemView> = order
        .lines
        .0
        .iter()
        .map(|line| OrderItemView {
            recipe_id: line.recipe_id,
            quantity: line.quantity,
            current_estimates: recipes
                .get(&line.recipe_id)
                .map(|recipe| estimate_line(recipe, line.quantity)),
        })
        .collect();

    let mut total_cost = 0.0;
    let mut needs: BTreeMap<(String, String), f64> = BTreeMap::new();
    for estimate in items.iter().filter_map(|i| i.current_estimates.as_ref()) {
        total_cost += estimate.total_cost;
        for ingredient in &estimate.ingredients {
            *needs
                .entry((ingredient.name.clone(), ingredient.unit.clone()))
                .or_insert(0.0) += ingredient.required;
        }
    }

    OrderView {
        id: order.id,
        customer_name: order.customer_name,
        order_date: order.order_date,
        delivery_date: order.delivery_date,
        status: order.status,
        items,
        total_cost,
        ingredient_requirements: needs
            .into_iter()
            .map(|((name, unit), required)| IngredientRequirement {
                name,
                unit,
                required,
            })
            .collect(),
    }
}

async fn views(db: &DatabaseConnection, orders: Vec<order::Model>) -> Result<Vec<OrderView>> {
    let recipe_ids: Vec<i64> = orders
        .iter()
        .flat_map(|o| o.lines.0.iter().map(|line| line.recipe_id))
        .collect();
    let recipes = recipes_by_id(db, &recipe_ids).await?;
    Ok(orders
        .into_iter()
        .map(|order| estimate_order(order, &recipes))
        .collect())
}

/// Creates an order after validating it against the current recipes.
pub async fn create_order(db: &DatabaseConnection, new: NewOrder) -> Result<OrderView> {
    let customer_name = new.customer_name.trim();
    if customer_name.is_empty() {
        return Err(Error::validation("Customer name cannot be empty"));
    }
    if new.items.is_empty() {
        return Err(Error::validation("An order needs at least one item"));
    }
    if new.items.iter().any(|line| line.quantity == 0) {
        return Err(Error::validation("Item quantities must be positive"));
    }
    if new.delivery_date < new.order_date {
        return Err(Error::validation(
            "Delivery date cannot be before the order date",
        ));
    }

    let recipe_ids: Vec<i64> = new.items.iter().map(|line| line.recipe_id).collect();
    let recipes = recipes_by_id(db, &recipe_ids).await?;
    if let Some(missing) = new
        .items
        .iter()
        .find(|line| !recipes.contains_key(&line.recipe_id))
    {
        return Err(Error::NotFound {
            entity: "Recipe",
            id: missing.recipe_id.to_string(),
        });
    }

    let created = order::ActiveModel {
        customer_name: Set(customer_name.to_string()),
        order_date: Set(new.order_date),
        delivery_date: Set(new.delivery_date),
        lines: Set(OrderLines(new.items)),
        status: Set(OrderStatus::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created order {} for {}", created.id, created.customer_name);
    Ok(estimate_order(created, &recipes))
}

/// All orders with current estimates, earliest delivery first.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderView>> {
    let orders = Order::find()
        .order_by_asc(order::Column::DeliveryDate)
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;
    views(db, orders).await
}

/// One order with current estimates.
pub async fn get_order(db: &DatabaseConnection, order_id: i64) -> Result<OrderView> {
    let order = find_order(db, order_id).await?;
    let mut views = views(db, vec![order]).await?;
    views.pop().ok_or_else(|| Error::NotFound {
        entity: "Order",
        id: order_id.to_string(),
    })
}

async fn find_order(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Order",
            id: order_id.to_string(),
        })
}

/// Moves a pending order to `status`. Completed and cancelled orders are final.
pub async fn update_status(
    db: &DatabaseConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<OrderView> {
    let order = find_order(db, order_id).await?;
    if order.status != OrderStatus::Pending || status == OrderStatus::Pending {
        return Err(Error::InvalidTransition {
            from: order.status.to_string(),
            to: status.to_string(),
        });
    }

    let mut active: order::ActiveModel = order.into();
    active.status = Set(status);
    let updated = active.update(db).await?;
    let mut views = views(db, vec![updated]).await?;
    views.pop().ok_or_else(|| Error::NotFound {
        entity: "Order",
        id: order_id.to_string(),
    })
}

/// Deletes an order.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let result = Order::delete_by_id(order_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "Order",
            id: order_id.to_string(),
        });
    }
    info!("Deleted order {}", order_id);
    Ok(())
}
