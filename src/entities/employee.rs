//! Employee entity - staff records of the resort kitchen.
//!
//! The natural key is `employee_id` (`EMP001`, `EMP002`, ...). It is nullable
//! only so that legacy rows imported without one can be found and numbered by
//! the identifier backfill; every code path that creates employees sets it.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user::Role;

/// List of duties, stored as a JSON array
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Duties(pub Vec<String>);

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Surrogate primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business identifier, unique when present
    #[sea_orm(unique)]
    #[serde(rename = "employeeID")]
    pub employee_id: Option<String>,
    /// Full name
    pub name: String,
    /// Job title (e.g. "Chef", "Lift Operator")
    pub position: String,
    /// Monthly pay rate
    pub monthly_rate: f64,
    /// First working day
    pub start_date: Date,
    /// Assigned duties
    pub duties: Duties,
    /// Inactive employees are kept for history instead of being deleted
    pub is_active: bool,
    /// Access role
    pub role: Role,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has at most one user account
    #[sea_orm(has_one = "super::user::Entity")]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
