//! Shopping list items and shopping bills.

use crate::{
    entities::{
        BillStatus, ItemStatus, ShoppingBill, ShoppingItem, shopping_bill, shopping_item,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for creating or editing a shopping item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    /// Item name
    pub name: String,
    /// Amount to buy
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
    /// Purchase status, `Needed` when absent
    #[serde(default)]
    pub status: Option<ItemStatus>,
}

impl ItemInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Item name cannot be empty"));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(Error::validation(format!(
                "Invalid quantity: {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Input for creating or editing a shopping bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingBillInput {
    /// Supplier bill number
    pub bill_number: String,
    /// Total of the bill
    pub total_amount: f64,
    /// Payment status, `Unpaid` when absent
    #[serde(default)]
    pub status: Option<BillStatus>,
    /// Date on the bill
    pub bill_date: NaiveDate,
}

impl ShoppingBillInput {
    fn validate(&self) -> Result<()> {
        if self.bill_number.trim().is_empty() {
            return Err(Error::validation("Bill number cannot be empty"));
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(Error::validation(format!(
                "Invalid total amount: {}",
                self.total_amount
            )));
        }
        Ok(())
    }
}

/// The shopping list, still-needed items first.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<shopping_item::Model>> {
    ShoppingItem::find()
        .order_by_asc(shopping_item::Column::Status)
        .order_by_asc(shopping_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds an item to the shopping list.
pub async fn create_item(
    db: &DatabaseConnection,
    input: ItemInput,
) -> Result<shopping_item::Model> {
    input.validate()?;
    shopping_item::ActiveModel {
        name: Set(input.name.trim().to_string()),
        quantity: Set(input.quantity),
        unit: Set(input.unit.trim().to_string()),
        status: Set(input.status.unwrap_or(ItemStatus::Needed)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Replaces the editable fields of an item; the status is kept when absent.
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    input: ItemInput,
) -> Result<shopping_item::Model> {
    input.validate()?;
    let existing = ShoppingItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Shopping item",
            id: item_id.to_string(),
        })?;

    let mut active: shopping_item::ActiveModel = existing.into();
    active.name = Set(input.name.trim().to_string());
    active.quantity = Set(input.quantity);
    active.unit = Set(input.unit.trim().to_string());
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.update(db).await.map_err(Into::into)
}

/// Removes an item from the shopping list.
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = ShoppingItem::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "Shopping item",
            id: item_id.to_string(),
        });
    }
    Ok(())
}

/// All shopping bills, newest first.
pub async fn list_bills(db: &DatabaseConnection) -> Result<Vec<shopping_bill::Model>> {
    ShoppingBill::find()
        .order_by_desc(shopping_bill::Column::BillDate)
        .order_by_desc(shopping_bill::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a shopping bill; bill numbers are unique.
pub async fn create_bill(
    db: &DatabaseConnection,
    input: ShoppingBillInput,
) -> Result<shopping_bill::Model> {
    input.validate()?;
    let bill_number = input.bill_number.trim().to_string();
    shopping_bill::ActiveModel {
        bill_number: Set(bill_number.clone()),
        total_amount: Set(input.total_amount),
        status: Set(input.status.unwrap_or(BillStatus::Unpaid)),
        bill_date: Set(input.bill_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| Error::from_insert(e, "billNumber", bill_number))
}

/// Replaces the editable fields of a shopping bill.
pub async fn update_bill(
    db: &DatabaseConnection,
    bill_id: i64,
    input: ShoppingBillInput,
) -> Result<shopping_bill::Model> {
    input.validate()?;
    let existing = ShoppingBill::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Shopping bill",
            id: bill_id.to_string(),
        })?;

    let bill_number = input.bill_number.trim().to_string();
    let mut active: shopping_bill::ActiveModel = existing.into();
    active.bill_number = Set(bill_number.clone());
    active.total_amount = Set(input.total_amount);
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.bill_date = Set(input.bill_date);
    active
        .update(db)
        .await
        .map_err(|e| Error::from_insert(e, "billNumber", bill_number))
}

/// Deletes a shopping bill.
pub async fn delete_bill(db: &DatabaseConnection, bill_id: i64) -> Result<()> {
    let result = ShoppingBill::delete_by_id(bill_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "Shopping bill",
            id: bill_id.to_string(),
        });
    }
    Ok(())
}

/// Sum of shopping bills dated in `[from, until)`.
pub async fn bills_total_between(
    db: &DatabaseConnection,
    from: NaiveDate,
    until: NaiveDate,
) -> Result<f64> {
    let bills = ShoppingBill::find()
        .filter(shopping_bill::Column::BillDate.gte(from))
        .filter(shopping_bill::Column::BillDate.lt(until))
        .all(db)
        .await?;
    Ok(bills.iter().map(|b| b.total_amount).sum())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn item(name: &str, quantity: f64) -> ItemInput {
        ItemInput {
            name: name.to_string(),
            quantity,
            unit: "kg".to_string(),
            status: None,
        }
    }

    fn shopping_bill(number: &str, total: f64) -> ShoppingBillInput {
        ShoppingBillInput {
            bill_number: number.to_string(),
            total_amount: total,
            status: None,
            bill_date: date(2025, 1, 10),
        }
    }

    #[tokio::test]
    async fn test_item_crud() -> Result<()> {
        let db = setup_test_db().await?;

        let flour = create_item(&db, item("Flour", 25.0)).await?;
        assert_eq!(flour.status, ItemStatus::Needed);

        let bought = update_item(
            &db,
            flour.id,
            ItemInput {
                status: Some(ItemStatus::Purchased),
                ..item("Flour", 25.0)
            },
        )
        .await?;
        assert_eq!(bought.status, ItemStatus::Purchased);

        // status is kept when the edit leaves it out
        let renamed = update_item(&db, flour.id, item("Rye flour", 20.0)).await?;
        assert_eq!(renamed.status, ItemStatus::Purchased);
        assert_eq!(renamed.quantity, 20.0);

        delete_item(&db, flour.id).await?;
        assert!(list_items(&db).await?.is_empty());

        let negative = create_item(&db, item("Salt", -1.0)).await;
        assert!(matches!(negative, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_shopping_bill_numbers_are_unique() -> Result<()> {
        let db = setup_test_db().await?;

        let bill = create_bill(&db, shopping_bill("SB-001", 120.5)).await?;
        assert_eq!(bill.status, BillStatus::Unpaid);

        let duplicate = create_bill(&db, shopping_bill("SB-001", 10.0)).await;
        assert!(matches!(
            duplicate,
            Err(Error::Duplicate {
                field: "billNumber",
                ..
            })
        ));

        let paid = update_bill(
            &db,
            bill.id,
            ShoppingBillInput {
                status: Some(BillStatus::Paid),
                ..shopping_bill("SB-001", 120.5)
            },
        )
        .await?;
        assert_eq!(paid.status, BillStatus::Paid);

        let total = bills_total_between(&db, date(2025, 1, 1), date(2025, 2, 1)).await?;
        assert_eq!(total, 120.5);

        delete_bill(&db, bill.id).await?;
        assert!(list_bills(&db).await?.is_empty());

        Ok(())
    }
}
