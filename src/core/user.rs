//! User listing and HR role management.

use crate::{
    entities::{Employee, Role, User, employee, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Public view of a user account, also cached by clients as `userInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Access role
    pub role: Role,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Business identifier of the linked employee
    #[serde(rename = "employeeID")]
    pub employee_id: Option<String>,
}

impl UserProfile {
    /// Combines an account with its employee record.
    #[must_use]
    pub fn new(account: user::Model, employee: Option<&employee::Model>) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            first_name: account.first_name,
            last_name: account.last_name,
            employee_id: employee.and_then(|e| e.employee_id.clone()),
        }
    }
}

/// Loads the profile of one account.
pub async fn get_profile(db: &DatabaseConnection, account: user::Model) -> Result<UserProfile> {
    let employee = Employee::find_by_id(account.employee_ref).one(db).await?;
    Ok(UserProfile::new(account, employee.as_ref()))
}

/// Lists every account with its employee identifier, ordered by username.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserProfile>> {
    let rows = User::find()
        .find_also_related(Employee)
        .order_by_asc(user::Column::Username)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(account, employee)| UserProfile::new(account, employee.as_ref()))
        .collect())
}

/// Request body for a role change
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoleChange {
    /// The role to assign
    pub role: Role,
}

/// Changes the role of `target_id`, acting as `actor`.
///
/// Only admins may change roles, and an admin cannot change their own role,
/// which keeps at least the acting admin in place.
pub async fn change_role(
    db: &DatabaseConnection,
    actor: &user::Model,
    target_id: i64,
    role: Role,
) -> Result<UserProfile> {
    if actor.role != Role::Admin {
        return Err(Error::Forbidden {
            message: "Only admins can change roles".to_string(),
        });
    }
    if actor.id == target_id {
        return Err(Error::Forbidden {
            message: "Admins cannot change their own role".to_string(),
        });
    }

    let target = User::find_by_id(target_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "User",
            id: target_id.to_string(),
        })?;

    let previous = target.role;
    let mut active: user::ActiveModel = target.into();
    active.role = Set(role);
    let updated = active.update(db).await?;

    info!(
        "{} changed role of {} from {} to {}",
        actor.username, updated.username, previous, role
    );
    get_profile(db, updated).await
}
