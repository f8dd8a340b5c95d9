//! Bill entity - general operating bills (utilities, rent, suppliers).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the bill is for
    pub description: String,
    /// Amount due, never negative
    pub amount: f64,
    /// Date the bill was issued
    pub bill_date: Date,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// `Bill` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
