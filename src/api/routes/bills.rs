//! General operating bills.

use crate::{
    api::{
        AppState,
        error::ApiResult,
        extract::{AuthUser, Json, Path},
    },
    core::bill::{self, BillInput},
    entities::bill as bill_entity,
};
use axum::{extract::State, http::StatusCode};

/// `GET /api/bills`
pub async fn list_bills(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<bill_entity::Model>>> {
    Ok(Json(bill::list_bills(&state.db).await?))
}

/// `POST /api/bills`
pub async fn create_bill(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<BillInput>,
) -> ApiResult<(StatusCode, Json<bill_entity::Model>)> {
    let created = bill::create_bill(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/bills/:id`
pub async fn update_bill(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(bill_id): Path<i64>,
    Json(input): Json<BillInput>,
) -> ApiResult<Json<bill_entity::Model>> {
    Ok(Json(bill::update_bill(&state.db, bill_id, input).await?))
}

/// `DELETE /api/bills/:id`
pub async fn delete_bill(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(bill_id): Path<i64>,
) -> ApiResult<StatusCode> {
    bill::delete_bill(&state.db, bill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
