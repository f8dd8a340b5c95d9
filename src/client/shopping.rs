//! Shopping screens: list, bills and the review queue.
//!
//! The review queue offers approve/reject only on pending reviews and
//! refetches after every decision, so the list always shows server state.

use super::{ApiClient, ClientResult};
use crate::entities::{ReviewStatus, shopping_bill, shopping_item, shopping_review};
use tracing::warn;

/// Shown when the shopping data cannot be fetched
pub const SHOPPING_BANNER: &str = "Failed to load shopping data. Please try again later.";

/// Decision on a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Approve the review
    Approve,
    /// Reject the review
    Reject,
}

/// Whether approve/reject is offered for `review`.
#[must_use]
pub fn can_decide(review: &shopping_review::Model) -> bool {
    review.status == ReviewStatus::Pending
}

/// Everything the shopping screen shows
#[derive(Debug, Clone, Default)]
pub struct ShoppingOverview {
    /// Shopping list
    pub items: Vec<shopping_item::Model>,
    /// Shopping bills
    pub bills: Vec<shopping_bill::Model>,
    /// Review queue
    pub reviews: Vec<shopping_review::Model>,
    /// Set when the last fetch or action failed
    pub banner: Option<String>,
}

impl ShoppingOverview {
    /// Fetches list, bills and reviews. A failure leaves the overview
    /// empty with a banner.
    pub async fn load(client: &ApiClient) -> Self {
        match Self::fetch(client).await {
            Ok(overview) => overview,
            Err(err) => {
                warn!("Failed to load shopping data: {}", err);
                Self {
                    banner: Some(SHOPPING_BANNER.to_string()),
                    ..Self::default()
                }
            }
        }
    }

    async fn fetch(client: &ApiClient) -> ClientResult<Self> {
        Ok(Self {
            items: client.list_shopping_items().await?,
            bills: client.list_shopping_bills().await?,
            reviews: client.list_reviews().await?,
            banner: None,
        })
    }

    /// Applies `decision` to the review `review_id`, then refetches.
    ///
    /// Reviews that are not pending are left alone. A rejected call sets the
    /// banner and keeps the current data. Returns whether the decision was
    /// recorded.
    pub async fn decide(&mut self, client: &ApiClient, review_id: i64, decision: Decision) -> bool {
        let pending = self
            .reviews
            .iter()
            .any(|review| review.id == review_id && can_decide(review));
        if !pending {
            return false;
        }

        let result = match decision {
            Decision::Approve => client.approve_review(review_id).await,
            Decision::Reject => client.reject_review(review_id).await,
        };
        if let Err(err) = result {
            self.banner = Some(err.banner());
            return false;
        }

        *self = Self::load(client).await;
        true
    }
}
