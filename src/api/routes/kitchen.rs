//! Orders and recipes.

use crate::{
    api::{
        AppState,
        error::ApiResult,
        extract::{AuthUser, Json, Path},
    },
    core::{
        order::{self, NewOrder, OrderView},
        recipe::{self, NewRecipe, RecipeView},
    },
    entities::{OrderStatus, recipe::RecipeIngredient},
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Body of a status change
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusChange {
    /// Requested status
    pub status: OrderStatus,
}

/// Body of an ingredient replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsUpdate {
    /// The new ingredient list
    pub ingredients: Vec<RecipeIngredient>,
}

/// `GET /api/orders`
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<OrderView>>> {
    Ok(Json(order::list_orders(&state.db).await?))
}

/// `POST /api/orders`
pub async fn create_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(new): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<OrderView>)> {
    let created = order::create_order(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /api/orders/:id`
pub async fn delete_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(order_id): Path<i64>,
) -> ApiResult<StatusCode> {
    order::delete_order(&state.db, order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /api/orders/:id/status`
pub async fn update_order_status(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(order_id): Path<i64>,
    Json(change): Json<StatusChange>,
) -> ApiResult<Json<OrderView>> {
    Ok(Json(
        order::update_status(&state.db, order_id, change.status).await?,
    ))
}

/// `GET /api/recipes`
pub async fn list_recipes(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<RecipeView>>> {
    let recipes = recipe::list_recipes(&state.db).await?;
    Ok(Json(recipes.into_iter().map(RecipeView::from).collect()))
}

/// `POST /api/recipes`
pub async fn create_recipe(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(new): Json<NewRecipe>,
) -> ApiResult<(StatusCode, Json<RecipeView>)> {
    let created = recipe::create_recipe(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `PUT /api/recipes/:id`
pub async fn update_recipe(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(recipe_id): Path<i64>,
    Json(update): Json<IngredientsUpdate>,
) -> ApiResult<Json<RecipeView>> {
    let updated = recipe::update_ingredients(&state.db, recipe_id, update.ingredients).await?;
    Ok(Json(updated.into()))
}
