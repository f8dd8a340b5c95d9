//! Shopping list, shopping bills and shopping reviews.

use crate::{
    api::{
        AppState,
        error::ApiResult,
        extract::{AuthUser, Json, Path},
    },
    core::{
        review::{self, NewReview},
        shopping::{self, ItemInput, ShoppingBillInput},
    },
    entities::{shopping_bill, shopping_item, shopping_review},
};
use axum::{extract::State, http::StatusCode};

/// `GET /api/shopping`
pub async fn list_items(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<shopping_item::Model>>> {
    Ok(Json(shopping::list_items(&state.db).await?))
}

/// `POST /api/shopping`
pub async fn create_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ItemInput>,
) -> ApiResult<(StatusCode, Json<shopping_item::Model>)> {
    let created = shopping::create_item(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/shopping/:id`
pub async fn update_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(item_id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> ApiResult<Json<shopping_item::Model>> {
    Ok(Json(shopping::update_item(&state.db, item_id, input).await?))
}

/// `DELETE /api/shopping/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(item_id): Path<i64>,
) -> ApiResult<StatusCode> {
    shopping::delete_item(&state.db, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/shopping/bills`
pub async fn list_bills(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<shopping_bill::Model>>> {
    Ok(Json(shopping::list_bills(&state.db).await?))
}

/// `POST /api/shopping/bills`
pub async fn create_bill(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ShoppingBillInput>,
) -> ApiResult<(StatusCode, Json<shopping_bill::Model>)> {
    let created = shopping::create_bill(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/shopping/bills/:id`
pub async fn update_bill(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(bill_id): Path<i64>,
    Json(input): Json<ShoppingBillInput>,
) -> ApiResult<Json<shopping_bill::Model>> {
    Ok(Json(shopping::update_bill(&state.db, bill_id, input).await?))
}

/// `DELETE /api/shopping/bills/:id`
pub async fn delete_bill(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(bill_id): Path<i64>,
) -> ApiResult<StatusCode> {
    shopping::delete_bill(&state.db, bill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/shopping/reviews`
pub async fn list_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<shopping_review::Model>>> {
    Ok(Json(review::list_reviews(&state.db).await?))
}

/// `POST /api/shopping/reviews`
pub async fn submit_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(new): Json<NewReview>,
) -> ApiResult<(StatusCode, Json<shopping_review::Model>)> {
    let created = review::submit_review(&state.db, &user.account.username, new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /api/shopping/reviews/:id/approve`
pub async fn approve_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(review_id): Path<i64>,
) -> ApiResult<Json<shopping_review::Model>> {
    let reviewer = &user.account.username;
    Ok(Json(review::approve_review(&state.db, review_id, reviewer).await?))
}

/// `POST /api/shopping/reviews/:id/reject`
pub async fn reject_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(review_id): Path<i64>,
) -> ApiResult<Json<shopping_review::Model>> {
    let reviewer = &user.account.username;
    Ok(Json(review::reject_review(&state.db, review_id, reviewer).await?))
}
