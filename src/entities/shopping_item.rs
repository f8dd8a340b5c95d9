//! Shopping item entity - entries of the shopping list.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether an item still has to be bought
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ItemStatus {
    /// Still to buy
    #[sea_orm(string_value = "Needed")]
    Needed,
    /// Bought
    #[sea_orm(string_value = "Purchased")]
    Purchased,
}

/// Shopping item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item name
    pub name: String,
    /// Amount to buy, never negative
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
    /// Purchase status
    pub status: ItemStatus,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// `ShoppingItem` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
