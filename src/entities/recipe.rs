//! Recipe entity - a dish and the ingredients one unit of it consumes.
//!
//! Ingredients are embedded as a JSON document; the per-unit cost is derived
//! from them and never stored.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe, per unit produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Ingredient name
    pub name: String,
    /// Quantity needed for one unit of the recipe
    pub quantity: f64,
    /// Unit of `quantity` (e.g. "kg", "l", "pcs")
    pub unit: String,
    /// Cost of one `unit` of the ingredient
    pub unit_cost: f64,
}

/// Ingredient list, stored as a JSON array
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Ingredients(pub Vec<RecipeIngredient>);

/// Recipe database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Dish name (unique)
    #[sea_orm(unique)]
    pub name: String,
    /// Ingredients per unit produced
    pub ingredients: Ingredients,
    /// When the recipe was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Cost of producing one unit with current ingredient prices.
    #[must_use]
    pub fn cost_per_unit(&self) -> f64 {
        self.ingredients
            .0
            .iter()
            .map(|ingredient| ingredient.quantity * ingredient.unit_cost)
            .sum()
    }
}

/// `Recipe` has no foreign keys; orders reference it from their JSON lines
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
