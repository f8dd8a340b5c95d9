//! Monthly summary business logic
//!
//! A summary records revenue, expenditure and the resulting profit or loss
//! for one calendar month. `profit_or_loss` is always recomputed from the
//! other two on write, so the stored figures can never disagree. Expenditure
//! can be taken from the books: the sum of general bills and shopping bills
//! dated in the month.

use crate::{
    core::{bill, shopping},
    entities::{MonthlySummary, monthly_summary},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month {
    first_day: NaiveDate,
}

impl Month {
    /// The month `month` (1-12) of `year`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| Error::validation(format!("Invalid month: {year}-{month:02}")))
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The current month in UTC.
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// First day of the month
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// First day of the following month
    #[must_use]
    pub fn next_first_day(self) -> NaiveDate {
        let (year, month) = if self.first_day.month() == 12 {
            (self.first_day.year() + 1, 1)
        } else {
            (self.first_day.year(), self.first_day.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(self.first_day)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::validation(format!("Month must look like YYYY-MM, got {s:?}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Expenditure booked in `month`: general bills plus shopping bills.
pub async fn month_expenditure(db: &DatabaseConnection, month: Month) -> Result<f64> {
    let (from, until) = (month.first_day(), month.next_first_day());
    let bills = bill::total_between(db, from, until).await?;
    let shopping = shopping::bills_total_between(db, from, until).await?;
    Ok(bills + shopping)
}

/// Inserts or replaces the summary for `month`.
pub async fn record_summary(
    db: &DatabaseConnection,
    month: Month,
    total_revenue: f64,
    total_expenditure: f64,
) -> Result<monthly_summary::Model> {
    if !total_revenue.is_finite() || !total_expenditure.is_finite() {
        return Err(Error::validation("Revenue and expenditure must be numbers"));
    }
    let key = month.to_string();
    let profit_or_loss = total_revenue - total_expenditure;
    let now = Utc::now();

    let existing = MonthlySummary::find()
        .filter(monthly_summary::Column::Month.eq(key.as_str()))
        .one(db)
        .await?;

    let saved = if let Some(summary) = existing {
        let mut active: monthly_summary::ActiveModel = summary.into();
        active.total_revenue = Set(total_revenue);
        active.total_expenditure = Set(total_expenditure);
        active.profit_or_loss = Set(profit_or_loss);
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        monthly_summary::ActiveModel {
            month: Set(key),
            total_revenue: Set(total_revenue),
            total_expenditure: Set(total_expenditure),
            profit_or_loss: Set(profit_or_loss),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?
    };

    info!(
        "Summary {}: revenue {:.2}, expenditure {:.2}, result {:.2}",
        saved.month, saved.total_revenue, saved.total_expenditure, saved.profit_or_loss
    );
    Ok(saved)
}

/// Records `month` with the given revenue and the expenditure from the books.
pub async fn record_from_books(
    db: &DatabaseConnection,
    month: Month,
    total_revenue: f64,
) -> Result<monthly_summary::Model> {
    let expenditure = month_expenditure(db, month).await?;
    record_summary(db, month, total_revenue, expenditure).await
}

/// All summaries, newest month first.
pub async fn list_summaries(db: &DatabaseConnection) -> Result<Vec<monthly_summary::Model>> {
    MonthlySummary::find()
        .order_by_desc(monthly_summary::Column::Month)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The most recent summary, if any.
pub async fn latest_summary(db: &DatabaseConnection) -> Result<Option<monthly_summary::Model>> {
    MonthlySummary::find()
        .order_by_desc(monthly_summary::Column::Month)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Formats a summary into one human-readable line.
#[must_use]
pub fn format_summary(summary: &monthly_summary::Model) -> String {
    let outcome = if summary.profit_or_loss >= 0.0 {
        "profit"
    } else {
        "loss"
    };
    format!(
        "{} | revenue {:.2} | expenditure {:.2} | {} {:.2}",
        summary.month,
        summary.total_revenue,
        summary.total_expenditure,
        outcome,
        summary.profit_or_loss.abs()
    )
}
