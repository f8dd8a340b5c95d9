//! Database configuration module for the resort kitchen backend.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs in [`crate::entities`], the one place any table is defined.

use crate::entities::{
    Bill, Employee, MonthlySummary, Order, PasswordReset, Recipe, Session, ShoppingBill,
    ShoppingItem, ShoppingReview, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{info, instrument, warn};

/// The one environment variable naming the database.
pub const DATABASE_URL_KEY: &str = "DATABASE_URL";

/// Earlier deployments used these names inconsistently. They are not read.
pub const LEGACY_DATABASE_KEYS: [&str; 2] = ["MONGODB_URI", "MONGO_URI"];

/// Default `SQLite` file, created on first connect.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/resort_kitchen.sqlite?mode=rwc";

/// Reads `DATABASE_URL`, if set.
///
/// Any legacy variable that is still set gets a warning naming it, since its
/// value is ignored.
#[must_use]
pub fn database_url_from_env() -> Option<String> {
    for legacy in LEGACY_DATABASE_KEYS {
        if std::env::var_os(legacy).is_some() {
            warn!("{legacy} is set but ignored; configure the database with {DATABASE_URL_KEY}");
        }
    }
    std::env::var(DATABASE_URL_KEY).ok()
}

/// Opens a connection to `database_url` and makes sure every table exists.
#[instrument]
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }
    let db = Database::connect(database_url).await?;
    info!("Database connection opened. Ensuring tables are created...");
    create_tables(&db).await?;
    Ok(db)
}

/// Directory holding the file of a `sqlite://` URL, if it names one.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates all tables from the entity definitions, skipping ones that exist.
///
/// Parents come before children so foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, Employee).await?;
    create_table(db, &schema, User).await?;
    create_table(db, &schema, Session).await?;
    create_table(db, &schema, PasswordReset).await?;
    create_table(db, &schema, MonthlySummary).await?;
    create_table(db, &schema, Bill).await?;
    create_table(db, &schema, Recipe).await?;
    create_table(db, &schema, Order).await?;
    create_table(db, &schema, ShoppingItem).await?;
    create_table(db, &schema, ShoppingBill).await?;
    create_table(db, &schema, ShoppingReview).await?;

    info!("Database tables ensured.");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EmployeeModel, OrderModel, ShoppingReviewModel, UserModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<ShoppingReviewModel> = ShoppingReview::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_connect_creates_schema() -> Result<()> {
        let db = connect("sqlite::memory:").await?;
        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir(DEFAULT_DATABASE_URL),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://kitchen.sqlite?mode=rwc"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/kitchen"), None);
    }
}
