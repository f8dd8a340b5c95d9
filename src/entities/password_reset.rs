//! Password reset entity - single-use reset tokens.
//!
//! Only the SHA-256 of the token is stored; the token itself leaves the
//! server through the reset delivery channel and nowhere else.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Password reset database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "password_resets")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Hex SHA-256 of the reset token
    #[sea_orm(unique)]
    pub token_hash: String,
    /// Account being reset
    pub user_id: i64,
    /// The token is rejected from this instant on
    pub expires_at: DateTimeUtc,
    /// Set once the token has been consumed
    pub used: bool,
}

/// Defines relationships between `PasswordReset` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reset belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
