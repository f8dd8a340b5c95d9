//! Monthly summary entity - revenue, expenditure and result per month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly summary database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_summaries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Month in `YYYY-MM` form (unique)
    #[sea_orm(unique)]
    pub month: String,
    /// Revenue for the month
    pub total_revenue: f64,
    /// Expenditure for the month
    pub total_expenditure: f64,
    /// Always `total_revenue - total_expenditure`
    pub profit_or_loss: f64,
    /// When the row was last written
    pub updated_at: DateTimeUtc,
}

/// `MonthlySummary` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
