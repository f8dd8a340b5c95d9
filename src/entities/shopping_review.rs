//! Shopping review entity - submitted shopping lists awaiting sign-off.
//!
//! Status only ever moves from `Pending` to `Approved` or `Rejected`; the
//! transition rule lives in `core::review`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReviewStatus {
    /// Waiting for a decision
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Accepted
    #[sea_orm(string_value = "Approved")]
    Approved,
    /// Turned down
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        };
        f.write_str(name)
    }
}

/// Shopping review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_reviews")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Date of the shopping list under review
    #[serde(rename = "date")]
    pub review_date: Date,
    /// Username of the submitter
    pub submitted_by: String,
    /// Number of items on the list
    pub items_count: i32,
    /// Review status
    pub status: ReviewStatus,
    /// Username of the reviewer, once decided
    pub reviewed_by: Option<String>,
    /// When the decision was made
    pub reviewed_at: Option<DateTimeUtc>,
}

/// `ShoppingReview` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
