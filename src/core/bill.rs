//! Bill business logic - general operating bills.

use crate::{
    entities::{Bill, bill},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for creating or editing a bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillInput {
    /// What the bill is for
    pub description: String,
    /// Amount due
    pub amount: f64,
    /// Date the bill was issued
    pub bill_date: NaiveDate,
}

impl BillInput {
    fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::validation("Bill description cannot be empty"));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::validation(format!("Invalid amount: {}", self.amount)));
        }
        Ok(())
    }
}

fn not_found(bill_id: i64) -> Error {
    Error::NotFound {
        entity: "Bill",
        id: bill_id.to_string(),
    }
}

/// All bills, newest first.
pub async fn list_bills(db: &DatabaseConnection) -> Result<Vec<bill::Model>> {
    Bill::find()
        .order_by_desc(bill::Column::BillDate)
        .order_by_desc(bill::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a bill.
pub async fn create_bill(db: &DatabaseConnection, input: BillInput) -> Result<bill::Model> {
    input.validate()?;
    bill::ActiveModel {
        description: Set(input.description.trim().to_string()),
        amount: Set(input.amount),
        bill_date: Set(input.bill_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Replaces the editable fields of a bill.
pub async fn update_bill(
    db: &DatabaseConnection,
    bill_id: i64,
    input: BillInput,
) -> Result<bill::Model> {
    input.validate()?;
    let existing = Bill::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(bill_id))?;

    let mut active: bill::ActiveModel = existing.into();
    active.description = Set(input.description.trim().to_string());
    active.amount = Set(input.amount);
    active.bill_date = Set(input.bill_date);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a bill.
pub async fn delete_bill(db: &DatabaseConnection, bill_id: i64) -> Result<()> {
    let result = Bill::delete_by_id(bill_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(not_found(bill_id));
    }
    Ok(())
}

/// Sum of bills dated in `[from, until)`.
pub async fn total_between(
    db: &DatabaseConnection,
    from: NaiveDate,
    until: NaiveDate,
) -> Result<f64> {
    let bills = Bill::find()
        .filter(bill::Column::BillDate.gte(from))
        .filter(bill::Column::BillDate.lt(until))
        .all(db)
        .await?;
    Ok(bills.iter().map(|b| b.amount).sum())
}
