//! One typed method per API endpoint.

use super::{ApiClient, ClientResult};
use crate::{
    api::routes::{
        MessageResponse,
        auth::{ForgotPasswordRequest, LoginRequest, LoginResponse, ResetPasswordRequest},
        kitchen::{IngredientsUpdate, StatusChange},
    },
    core::{
        auth::NewUser,
        bill::BillInput,
        dashboard::DashboardStats,
        employee::NewEmployee,
        order::{NewOrder, OrderView},
        recipe::{NewRecipe, RecipeView},
        review::NewReview,
        shopping::{ItemInput, ShoppingBillInput},
        user::{RoleChange, UserProfile},
    },
    entities::{
        OrderStatus, Role, bill, employee, recipe::RecipeIngredient, shopping_bill, shopping_item,
        shopping_review,
    },
};
use reqwest::Method;

impl ApiClient {
    /// `GET /api/health`
    pub async fn health(&self) -> ClientResult<MessageResponse> {
        self.get("/api/health").await
    }

    /// `POST /api/auth/register`
    pub async fn register(&self, new: &NewUser) -> ClientResult<UserProfile> {
        self.send_json(Method::POST, "/api/auth/register", new).await
    }

    /// `POST /api/auth/login`; does not store the token.
    pub async fn login(&self, login: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/api/auth/login", &request).await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> ClientResult<()> {
        self.send_no_content(Method::POST, "/api/auth/logout").await
    }

    /// `POST /api/auth/forgot-password`
    pub async fn forgot_password(&self, email: &str) -> ClientResult<MessageResponse> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.send_json(Method::POST, "/api/auth/forgot-password", &request)
            .await
    }

    /// `POST /api/auth/reset-password`
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
    ) -> ClientResult<MessageResponse> {
        let request = ResetPasswordRequest {
            token: token.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/api/auth/reset-password", &request)
            .await
    }

    /// `GET /api/users/all`
    pub async fn list_users(&self) -> ClientResult<Vec<UserProfile>> {
        self.get("/api/users/all").await
    }

    /// `PATCH /api/users/:id/role`
    pub async fn change_role(&self, user_id: i64, role: Role) -> ClientResult<UserProfile> {
        let path = format!("/api/users/{user_id}/role");
        self.send_json(Method::PATCH, &path, &RoleChange { role }).await
    }

    /// `GET /api/employees`
    pub async fn list_employees(&self) -> ClientResult<Vec<employee::Model>> {
        self.get("/api/employees").await
    }

    /// `POST /api/employees`
    pub async fn create_employee(&self, new: &NewEmployee) -> ClientResult<employee::Model> {
        self.send_json(Method::POST, "/api/employees", new).await
    }

    /// `GET /api/dashboard/stats`
    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.get("/api/dashboard/stats").await
    }

    /// `GET /api/orders`
    pub async fn list_orders(&self) -> ClientResult<Vec<OrderView>> {
        self.get("/api/orders").await
    }

    /// `POST /api/orders`
    pub async fn create_order(&self, new: &NewOrder) -> ClientResult<OrderView> {
        self.send_json(Method::POST, "/api/orders", new).await
    }

    /// `DELETE /api/orders/:id`
    pub async fn delete_order(&self, order_id: i64) -> ClientResult<()> {
        self.send_no_content(Method::DELETE, &format!("/api/orders/{order_id}"))
            .await
    }

    /// `PATCH /api/orders/:id/status`
    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> ClientResult<OrderView> {
        let path = format!("/api/orders/{order_id}/status");
        self.send_json(Method::PATCH, &path, &StatusChange { status })
            .await
    }

    /// `GET /api/recipes`
    pub async fn list_recipes(&self) -> ClientResult<Vec<RecipeView>> {
        self.get("/api/recipes").await
    }

    /// `POST /api/recipes`
    pub async fn create_recipe(&self, new: &NewRecipe) -> ClientResult<RecipeView> {
        self.send_json(Method::POST, "/api/recipes", new).await
    }

    /// `PUT /api/recipes/:id`
    pub async fn update_recipe(
        &self,
        recipe_id: i64,
        ingredients: Vec<RecipeIngredient>,
    ) -> ClientResult<RecipeView> {
        let path = format!("/api/recipes/{recipe_id}");
        self.send_json(Method::PUT, &path, &IngredientsUpdate { ingredients })
            .await
    }

    /// `GET /api/bills`
    pub async fn list_bills(&self) -> ClientResult<Vec<bill::Model>> {
        self.get("/api/bills").await
    }

    /// `POST /api/bills`
    pub async fn create_bill(&self, input: &BillInput) -> ClientResult<bill::Model> {
        self.send_json(Method::POST, "/api/bills", input).await
    }

    /// `PUT /api/bills/:id`
    pub async fn update_bill(&self, bill_id: i64, input: &BillInput) -> ClientResult<bill::Model> {
        self.send_json(Method::PUT, &format!("/api/bills/{bill_id}"), input)
            .await
    }

    /// `DELETE /api/bills/:id`
    pub async fn delete_bill(&self, bill_id: i64) -> ClientResult<()> {
        self.send_no_content(Method::DELETE, &format!("/api/bills/{bill_id}"))
            .await
    }

    /// `GET /api/shopping`
    pub async fn list_shopping_items(&self) -> ClientResult<Vec<shopping_item::Model>> {
        self.get("/api/shopping").await
    }

    /// `POST /api/shopping`
    pub async fn create_shopping_item(
        &self,
        input: &ItemInput,
    ) -> ClientResult<shopping_item::Model> {
        self.send_json(Method::POST, "/api/shopping", input).await
    }

    /// `PUT /api/shopping/:id`
    pub async fn update_shopping_item(
        &self,
        item_id: i64,
        input: &ItemInput,
    ) -> ClientResult<shopping_item::Model> {
        self.send_json(Method::PUT, &format!("/api/shopping/{item_id}"), input)
            .await
    }

    /// `DELETE /api/shopping/:id`
    pub async fn delete_shopping_item(&self, item_id: i64) -> ClientResult<()> {
        self.send_no_content(Method::DELETE, &format!("/api/shopping/{item_id}"))
            .await
    }

    /// `GET /api/shopping/bills`
    pub async fn list_shopping_bills(&self) -> ClientResult<Vec<shopping_bill::Model>> {
        self.get("/api/shopping/bills").await
    }

    /// `POST /api/shopping/bills`
    pub async fn create_shopping_bill(
        &self,
        input: &ShoppingBillInput,
    ) -> ClientResult<shopping_bill::Model> {
        self.send_json(Method::POST, "/api/shopping/bills", input)
            .await
    }

    /// `PUT /api/shopping/bills/:id`
    pub async fn update_shopping_bill(
        &self,
        bill_id: i64,
        input: &ShoppingBillInput,
    ) -> ClientResult<shopping_bill::Model> {
        let path = format!("/api/shopping/bills/{bill_id}");
        self.send_json(Method::PUT, &path, input).await
    }

    /// `DELETE /api/shopping/bills/:id`
    pub async fn delete_shopping_bill(&self, bill_id: i64) -> ClientResult<()> {
        let path = format!("/api/shopping/bills/{bill_id}");
        self.send_no_content(Method::DELETE, &path).await
    }

    /// `GET /api/shopping/reviews`
    pub async fn list_reviews(&self) -> ClientResult<Vec<shopping_review::Model>> {
        self.get("/api/shopping/reviews").await
    }

    /// `POST /api/shopping/reviews`
    pub async fn submit_review(&self, new: &NewReview) -> ClientResult<shopping_review::Model> {
        self.send_json(Method::POST, "/api/shopping/reviews", new)
            .await
    }

    /// `POST /api/shopping/reviews/:id/approve`
    pub async fn approve_review(&self, review_id: i64) -> ClientResult<shopping_review::Model> {
        self.post_empty(&format!("/api/shopping/reviews/{review_id}/approve"))
            .await
    }

    /// `POST /api/shopping/reviews/:id/reject`
    pub async fn reject_review(&self, review_id: i64) -> ClientResult<shopping_review::Model> {
        self.post_empty(&format!("/api/shopping/reviews/{review_id}/reject"))
            .await
    }
}
