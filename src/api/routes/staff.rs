//! Users, employees and the dashboard.

use crate::{
    api::{
        AppState,
        error::ApiResult,
        extract::{AdminUser, AuthUser, Json, Path},
    },
    core::{
        dashboard::{self, DashboardStats},
        employee::{self, NewEmployee},
        user::{self, RoleChange, UserProfile},
    },
    entities::employee as employee_entity,
};
use axum::{extract::State, http::StatusCode};

/// `GET /api/users/all`
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserProfile>>> {
    Ok(Json(user::list_users(&state.db).await?))
}

/// `PATCH /api/users/:id/role`
pub async fn change_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
    Json(change): Json<RoleChange>,
) -> ApiResult<Json<UserProfile>> {
    let profile = user::change_role(&state.db, &admin.account, user_id, change.role).await?;
    Ok(Json(profile))
}

/// `GET /api/employees`
pub async fn list_employees(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<employee_entity::Model>>> {
    Ok(Json(employee::list_employees(&state.db).await?))
}

/// `POST /api/employees`
pub async fn create_employee(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(new): Json<NewEmployee>,
) -> ApiResult<(StatusCode, Json<employee_entity::Model>)> {
    let created = employee::create_employee(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/dashboard/stats`
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(dashboard::get_stats(&state.db).await?))
}
