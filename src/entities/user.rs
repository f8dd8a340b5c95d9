//! User entity - login accounts, each tied to exactly one employee.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access role shared by users and employees
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including HR role management
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Kitchen or floor manager
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Regular staff member (`user` is accepted as an alias)
    #[sea_orm(string_value = "staff")]
    #[serde(alias = "user")]
    Staff,
}

impl Role {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name (unique)
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email (unique)
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Access role
    pub role: Role,
    /// Owning employee (`employees.id`), one user per employee
    #[sea_orm(unique)]
    pub employee_ref: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each user belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeRef",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// A user has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
