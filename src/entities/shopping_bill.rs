//! Shopping bill entity - supplier receipts for shopping runs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment status of a shopping bill
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BillStatus {
    /// Not paid yet
    #[sea_orm(string_value = "Unpaid")]
    Unpaid,
    /// Settled
    #[sea_orm(string_value = "Paid")]
    Paid,
}

/// Shopping bill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_bills")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier bill number (unique)
    #[sea_orm(unique)]
    pub bill_number: String,
    /// Total of the bill, never negative
    pub total_amount: f64,
    /// Payment status
    pub status: BillStatus,
    /// Date on the bill
    pub bill_date: Date,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// `ShoppingBill` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
