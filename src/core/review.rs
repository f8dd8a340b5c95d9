//! Shopping reviews - submitted shopping lists and their sign-off.
//!
//! A review starts `Pending` and is decided exactly once, to `Approved` or
//! `Rejected`. Any other transition is refused with
//! [`Error::InvalidTransition`].

use crate::{
    entities::{ReviewStatus, ShoppingReview, shopping_review},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Input for submitting a review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Date of the shopping list
    pub date: NaiveDate,
    /// Number of items on the list
    pub items_count: i32,
}

/// Whether a review may move from `from` to `to`.
#[must_use]
pub const fn can_transition(from: ReviewStatus, to: ReviewStatus) -> bool {
    matches!(
        (from, to),
        (
            ReviewStatus::Pending,
            ReviewStatus::Approved | ReviewStatus::Rejected
        )
    )
}

/// All reviews, pending ones first, then newest first.
pub async fn list_reviews(db: &DatabaseConnection) -> Result<Vec<shopping_review::Model>> {
    let mut reviews = ShoppingReview::find()
        .order_by_desc(shopping_review::Column::ReviewDate)
        .order_by_desc(shopping_review::Column::Id)
        .all(db)
        .await?;
    reviews.sort_by_key(|r| r.status != ReviewStatus::Pending);
    Ok(reviews)
}

/// Submits a shopping list for review on behalf of `submitted_by`.
pub async fn submit_review(
    db: &DatabaseConnection,
    submitted_by: &str,
    new: NewReview,
) -> Result<shopping_review::Model> {
    if new.items_count < 0 {
        return Err(Error::validation("Item count cannot be negative"));
    }
    shopping_review::ActiveModel {
        review_date: Set(new.date),
        submitted_by: Set(submitted_by.to_string()),
        items_count: Set(new.items_count),
        status: Set(ReviewStatus::Pending),
        reviewed_by: Set(None),
        reviewed_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Decides a pending review.
pub async fn decide_review(
    db: &DatabaseConnection,
    review_id: i64,
    reviewer: &str,
    decision: ReviewStatus,
) -> Result<shopping_review::Model> {
    let review = ShoppingReview::find_by_id(review_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Shopping review",
            id: review_id.to_string(),
        })?;

    if !can_transition(review.status, decision) {
        return Err(Error::InvalidTransition {
            from: review.status.to_string(),
            to: decision.to_string(),
        });
    }

    let mut active: shopping_review::ActiveModel = review.into();
    active.status = Set(decision);
    active.reviewed_by = Set(Some(reviewer.to_string()));
    active.reviewed_at = Set(Some(Utc::now()));
    let updated = active.update(db).await?;

    info!("{} marked review {} as {}", reviewer, review_id, decision);
    Ok(updated)
}

/// Approves a pending review.
pub async fn approve_review(
    db: &DatabaseConnection,
    review_id: i64,
    reviewer: &str,
) -> Result<shopping_review::Model> {
    decide_review(db, review_id, reviewer, ReviewStatus::Approved).await
}

/// Rejects a pending review.
pub async fn reject_review(
    db: &DatabaseConnection,
    review_id: i64,
    reviewer: &str,
) -> Result<shopping_review::Model> {
    decide_review(db, review_id, reviewer, ReviewStatus::Rejected).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_transition_table() {
        use ReviewStatus::{Approved, Pending, Rejected};
        assert!(can_transition(Pending, Approved));
        assert!(can_transition(Pending, Rejected));
        assert!(!can_transition(Pending, Pending));
        assert!(!can_transition(Approved, Rejected));
        assert!(!can_transition(Rejected, Approved));
        assert!(!can_transition(Approved, Pending));
    }

    #[tokio::test]
    async fn test_approve_then_refuse_second_decision() -> Result<()> {
        let db = setup_test_db().await?;
        let review = submit_review(
            &db,
            "hanna",
            NewReview {
                date: date(2025, 1, 12),
                items_count: 14,
            },
        )
        .await?;
        assert_eq!(review.status, ReviewStatus::Pending);

        let approved = approve_review(&db, review.id, "anna").await?;
        assert_eq!(approved.status, ReviewStatus::Approved);
        assert_eq!(approved.reviewed_by.as_deref(), Some("anna"));
        assert!(approved.reviewed_at.is_some());

        let listed = list_reviews(&db).await?;
        assert_eq!(listed[0].status, ReviewStatus::Approved);

        let again = reject_review(&db, review.id, "anna").await;
        assert!(matches!(again, Err(Error::InvalidTransition { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_pending_reviews_listed_first() -> Result<()> {
        let db = setup_test_db().await?;
        let older = submit_review(
            &db,
            "hanna",
            NewReview {
                date: date(2025, 1, 1),
                items_count: 3,
            },
        )
        .await?;
        let newer = submit_review(
            &db,
            "hanna",
            NewReview {
                date: date(2025, 1, 8),
                items_count: 5,
            },
        )
        .await?;
        reject_review(&db, newer.id, "anna").await?;

        let listed = list_reviews(&db).await?;
        assert_eq!(listed[0].id, older.id);
        assert_eq!(listed[1].status, ReviewStatus::Rejected);

        assert!(matches!(
            approve_review(&db, 999, "anna").await,
            Err(Error::NotFound { .. })
        ));

        Ok(())
    }
}
