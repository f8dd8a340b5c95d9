//! Dashboard statistics - counts over the operational tables plus the
//! current month's expenditure and the latest recorded summary.

use crate::{
    core::summary::{self, Month},
    entities::{
        BillStatus, Employee, ItemStatus, Order, OrderStatus, ReviewStatus, ShoppingBill,
        ShoppingItem, ShoppingReview, employee, monthly_summary, order, shopping_bill,
        shopping_item, shopping_review,
    },
    errors::Result,
};
use sea_orm::{PaginatorTrait, prelude::*};
use serde::{Deserialize, Serialize};

/// Figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Employees currently working
    pub active_employees: u64,
    /// All employees, deactivated ones included
    pub total_employees: u64,
    /// Orders still to deliver
    pub pending_orders: u64,
    /// Delivered orders
    pub completed_orders: u64,
    /// Shopping items not yet bought
    pub needed_shopping_items: u64,
    /// Shopping reviews awaiting a decision
    pub pending_reviews: u64,
    /// Shopping bills not yet paid
    pub unpaid_shopping_bills: u64,
    /// Month the expenditure figure covers, `YYYY-MM`
    pub current_month: String,
    /// Bills and shopping bills dated in the current month
    pub month_expenditure: f64,
    /// Most recent monthly summary, if any was recorded
    pub latest_summary: Option<monthly_summary::Model>,
}

/// Collects dashboard statistics for `month`.
pub async fn stats_for(db: &DatabaseConnection, month: Month) -> Result<DashboardStats> {
    let total_employees = Employee::find().count(db).await?;
    let active_employees = Employee::find()
        .filter(employee::Column::IsActive.eq(true))
        .count(db)
        .await?;
    let pending_orders = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Pending))
        .count(db)
        .await?;
    let completed_orders = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Completed))
        .count(db)
        .await?;
    let needed_shopping_items = ShoppingItem::find()
        .filter(shopping_item::Column::Status.eq(ItemStatus::Needed))
        .count(db)
        .await?;
    let pending_reviews = ShoppingReview::find()
        .filter(shopping_review::Column::Status.eq(ReviewStatus::Pending))
        .count(db)
        .await?;
    let unpaid_shopping_bills = ShoppingBill::find()
        .filter(shopping_bill::Column::Status.eq(BillStatus::Unpaid))
        .count(db)
        .await?;

    Ok(DashboardStats {
        active_employees,
        total_employees,
        pending_orders,
        completed_orders,
        needed_shopping_items,
        pending_reviews,
        unpaid_shopping_bills,
        current_month: month.to_string(),
        month_expenditure: summary::month_expenditure(db, month).await?,
        latest_summary: summary::latest_summary(db).await?,
    })
}

/// Dashboard statistics for the current month.
pub async fn get_stats(db: &DatabaseConnection) -> Result<DashboardStats> {
    stats_for(db, Month::current()).await
}
