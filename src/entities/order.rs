//! Order entity - a customer order made of recipe lines.
//!
//! Cost and ingredient estimates are not stored here; `core::order` derives
//! them from the current recipes every time an order is read.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Accepted, not yet delivered
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Delivered
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Called off
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// One line of an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Referenced recipe (`recipes.id`)
    pub recipe_id: i64,
    /// Units ordered, always positive
    pub quantity: u32,
}

/// Order lines, stored as a JSON array
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OrderLines(pub Vec<OrderLine>);

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Who ordered
    pub customer_name: String,
    /// Date the order was placed
    pub order_date: Date,
    /// Date the order is due
    pub delivery_date: Date,
    /// Ordered recipes and quantities
    pub lines: OrderLines,
    /// Lifecycle status
    pub status: OrderStatus,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// `Order` references recipes through its JSON lines only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
