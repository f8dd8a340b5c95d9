//! Shared test utilities for the resort kitchen backend.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    config::{roster::RosterEntry, settings::MIN_BCRYPT_COST},
    core::{
        auth::{self, NewUser},
        employee::{self, NewEmployee},
        order::{self, NewOrder, OrderView},
        recipe::{self, NewRecipe},
    },
    entities::{Role, employee::Duties, order::OrderLine, recipe::RecipeIngredient},
    entities,
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Password of every account made by [`create_test_user`]
pub const TEST_PASSWORD: &str = "correct-horse";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A calendar date; panics on an impossible date.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Employee input with sensible defaults.
///
/// # Defaults
/// * `position`: "Line Cook"
/// * `monthly_rate`: 2500.0
/// * `start_date`: 2024-12-01
/// * `duties`: ["Prep"]
/// * `role`: staff
#[must_use]
pub fn new_employee(employee_id: &str, name: &str) -> NewEmployee {
    NewEmployee {
        employee_id: Some(employee_id.to_string()),
        name: name.to_string(),
        position: "Line Cook".to_string(),
        monthly_rate: 2500.0,
        start_date: date(2024, 12, 1),
        duties: vec!["Prep".to_string()],
        role: Role::Staff,
    }
}

/// Inserts an employee the way older records look: with no identifier, or
/// with the one given (typically an empty string). Bypasses validation.
pub async fn create_legacy_employee(
    db: &DatabaseConnection,
    name: &str,
    employee_id: Option<&str>,
) -> Result<entities::employee::Model> {
    let record = entities::employee::ActiveModel {
        employee_id: Set(employee_id.map(str::to_string)),
        name: Set(name.to_string()),
        position: Set("Line Cook".to_string()),
        monthly_rate: Set(2500.0),
        start_date: Set(date(2024, 12, 1)),
        duties: Set(Duties(Vec::new())),
        is_active: Set(true),
        role: Set(Role::Staff),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(record.insert(db).await?)
}

/// Roster entry with the same defaults as [`new_employee`].
#[must_use]
pub fn roster_entry(employee_id: &str, name: &str) -> RosterEntry {
    RosterEntry {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        position: "Line Cook".to_string(),
        monthly_rate: 2500.0,
        start_date: date(2024, 12, 1),
        duties: vec!["Prep".to_string()],
        role: Role::Staff,
    }
}

/// Registration input for `username`, linked to `employee_id`.
///
/// # Defaults
/// * `email`: `{username}@example.com`
/// * `password`: [`TEST_PASSWORD`]
#[must_use]
pub fn new_user(employee_id: &str, username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: TEST_PASSWORD.to_string(),
        employee_id: employee_id.to_string(),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
    }
}

/// Creates an account with the given role, creating its employee first when
/// `employee_id` is not on file yet. Uses the cheapest bcrypt cost.
pub async fn create_test_user(
    db: &DatabaseConnection,
    employee_id: &str,
    username: &str,
    role: Role,
) -> Result<entities::user::Model> {
    if employee::get_employee_by_employee_id(db, employee_id)
        .await?
        .is_none()
    {
        employee::create_employee(db, new_employee(employee_id, username)).await?;
    }
    auth::create_user(db, new_user(employee_id, username), role, MIN_BCRYPT_COST).await
}

/// One recipe ingredient.
#[must_use]
pub fn ingredient(name: &str, quantity: f64, unit: &str, unit_cost: f64) -> RecipeIngredient {
    RecipeIngredient {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        unit_cost,
    }
}

/// Creates a recipe costing 4.2 per unit: 0.2 kg beef at 20 and 0.1 kg
/// onion at 2.
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::recipe::Model> {
    recipe::create_recipe(
        db,
        NewRecipe {
            name: name.to_string(),
            ingredients: vec![
                ingredient("Beef", 0.2, "kg", 20.0),
                ingredient("Onion", 0.1, "kg", 2.0),
            ],
        },
    )
    .await
}

/// Creates an order for "Summit Hut" placed 2025-01-10 and due 2025-01-12,
/// one line per `(recipe_id, quantity)`.
pub async fn create_test_order(db: &DatabaseConnection, lines: &[(i64, u32)]) -> Result<OrderView> {
    order::create_order(
        db,
        NewOrder {
            customer_name: "Summit Hut".to_string(),
            order_date: date(2025, 1, 10),
            delivery_date: date(2025, 1, 12),
            items: lines
                .iter()
                .map(|&(recipe_id, quantity)| OrderLine {
                    recipe_id,
                    quantity,
                })
                .collect(),
        },
    )
    .await
}
