//! End-to-end flows: the real router on an ephemeral port, driven through
//! the real client.

#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use chrono::NaiveDate;
use resort_kitchen::{
    api::{AppState, build_router, error::ErrorBody},
    client::{
        ApiClient, MemorySessionStore, SessionStore,
        flows::{FlowState, ForgotPasswordFlow, LoginFlow, Redirect, ResetPasswordFlow},
        hr::{Gate, UserRoster, role_gate},
        orders::OrderBoard,
        shopping::{Decision, ShoppingOverview},
    },
    config::{
        database,
        settings::{AppSettings, MIN_BCRYPT_COST},
    },
    core::{
        auth::{self, MemoryDelivery, NewUser},
        employee::{self, NewEmployee},
        order::NewOrder,
        recipe::NewRecipe,
        review::NewReview,
    },
    entities::{Role, ReviewStatus, order::OrderLine, recipe::RecipeIngredient},
};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const PASSWORD: &str = "snowfall-42";

struct TestServer {
    base_url: String,
    delivery: Arc<MemoryDelivery>,
}

async fn add_account(
    db: &DatabaseConnection,
    employee_id: &str,
    username: &str,
    role: Role,
) -> TestResult {
    employee::create_employee(
        db,
        NewEmployee {
            employee_id: Some(employee_id.to_string()),
            name: username.to_string(),
            position: "Chef".to_string(),
            monthly_rate: 3000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            duties: Vec::new(),
            role,
        },
    )
    .await?;
    auth::create_user(
        db,
        NewUser {
            username: username.to_string(),
            email: format!("{username}@resort.test"),
            password: PASSWORD.to_string(),
            employee_id: employee_id.to_string(),
            first_name: username.to_string(),
            last_name: "Test".to_string(),
        },
        role,
        MIN_BCRYPT_COST,
    )
    .await?;
    Ok(())
}

async fn spawn_server() -> Result<TestServer, Box<dyn std::error::Error>> {
    let db = database::connect("sqlite::memory:").await?;
    add_account(&db, "EMP001", "anna", Role::Admin).await?;
    add_account(&db, "EMP002", "marco", Role::Staff).await?;

    let settings = AppSettings {
        bcrypt_cost: MIN_BCRYPT_COST,
        ..AppSettings::default()
    };
    let delivery = Arc::new(MemoryDelivery::default());
    let state = AppState::new(db, settings, delivery.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, build_router(state)).await;
    });

    Ok(TestServer {
        base_url: format!("http://{address}"),
        delivery,
    })
}

async fn logged_in(
    server: &TestServer,
    login: &str,
) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let mut client = ApiClient::new(&server.base_url);
    let response = client.login(login, PASSWORD).await?;
    client.set_token(response.token);
    Ok(client)
}

#[tokio::test]
async fn test_login_persists_session_and_redirects_by_role() -> TestResult {
    let server = spawn_server().await?;
    assert_eq!(
        ApiClient::new(&server.base_url).health().await?.message,
        "ok"
    );

    let mut client = ApiClient::new(&server.base_url);
    let store = MemorySessionStore::default();
    let mut flow = LoginFlow::default();
    let state = flow.submit(&mut client, &store, "anna", PASSWORD).await;
    assert_eq!(
        state,
        &FlowState::Succeeded {
            message: None,
            redirect: Some(Redirect::now("/admin/dashboard")),
        }
    );
    let session = store.load()?;
    assert_eq!(session.auth_token.as_deref(), client.token());
    assert_eq!(session.user_info.unwrap().employee_id.as_deref(), Some("EMP001"));
    assert!(matches!(role_gate(&store), Gate::Allowed(_)));

    let mut staff = ApiClient::new(&server.base_url);
    let staff_store = MemorySessionStore::default();
    let mut flow = LoginFlow::default();
    let state = flow
        .submit(&mut staff, &staff_store, "marco@resort.test", PASSWORD)
        .await;
    assert_eq!(
        state,
        &FlowState::Succeeded {
            message: None,
            redirect: Some(Redirect::now("/dashboard")),
        }
    );
    assert!(matches!(
        role_gate(&staff_store),
        Gate::RedirectToDashboard { .. }
    ));

    let mut flow = LoginFlow::default();
    let mut stranger = ApiClient::new(&server.base_url);
    let state = flow
        .submit(&mut stranger, &MemorySessionStore::default(), "anna", "wrong-password")
        .await;
    assert!(matches!(state, FlowState::Failed { .. }));

    Ok(())
}

#[tokio::test]
async fn test_user_management_is_admin_only() -> TestResult {
    let server = spawn_server().await?;
    let admin = logged_in(&server, "anna").await?;
    let staff = logged_in(&server, "marco").await?;

    let anonymous = ApiClient::new(&server.base_url).list_users().await;
    assert_eq!(anonymous.unwrap_err().status(), Some(401));
    let forbidden = staff.list_users().await;
    assert_eq!(forbidden.unwrap_err().status(), Some(403));

    let mut roster = UserRoster::load(&admin).await?;
    assert_eq!(roster.users().len(), 2);
    let marco_id = roster
        .users()
        .iter()
        .find(|u| u.username == "marco")
        .unwrap()
        .id;

    assert!(roster.change_role(&admin, marco_id, Role::Manager, true).await);
    let marco = roster.users().iter().find(|u| u.id == marco_id).unwrap();
    assert_eq!(marco.role, Role::Manager);

    let anna_id = roster
        .users()
        .iter()
        .find(|u| u.username == "anna")
        .unwrap()
        .id;
    assert!(!roster.change_role(&admin, anna_id, Role::Staff, true).await);
    assert!(roster.banner().is_some());
    let anna = roster.users().iter().find(|u| u.id == anna_id).unwrap();
    assert_eq!(anna.role, Role::Admin);

    Ok(())
}

#[tokio::test]
async fn test_review_decisions_refetch_and_conflict() -> TestResult {
    let server = spawn_server().await?;
    let admin = logged_in(&server, "anna").await?;
    let staff = logged_in(&server, "marco").await?;

    let submitted = staff
        .submit_review(&NewReview {
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            items_count: 6,
        })
        .await?;
    assert_eq!(submitted.status, ReviewStatus::Pending);
    assert_eq!(submitted.submitted_by, "marco");

    let mut overview = ShoppingOverview::load(&admin).await;
    assert!(overview.banner.is_none());
    assert!(overview.decide(&admin, submitted.id, Decision::Approve).await);
    assert_eq!(overview.reviews[0].status, ReviewStatus::Approved);
    assert_eq!(overview.reviews[0].reviewed_by.as_deref(), Some("anna"));

    let again = admin.reject_review(submitted.id).await;
    assert_eq!(again.unwrap_err().status(), Some(409));

    Ok(())
}

#[tokio::test]
async fn test_password_reset_via_delivered_link() -> TestResult {
    let server = spawn_server().await?;
    let old_session = logged_in(&server, "marco").await?;
    let client = ApiClient::new(&server.base_url);

    let mut forgot = ForgotPasswordFlow::default();
    let state = forgot.submit(&client, "marco@resort.test").await;
    assert!(matches!(state, FlowState::Succeeded { .. }));

    let mut unknown = ForgotPasswordFlow::default();
    let state = unknown.submit(&client, "nobody@resort.test").await.clone();
    assert_eq!(&state, forgot.state());

    let link = server.delivery.last_link_for("marco@resort.test").unwrap();
    let mut reset = ResetPasswordFlow::from_link(&link);
    assert!(reset.can_submit());
    let state = reset
        .submit(&client, "fresh-powder-7", "fresh-powder-7")
        .await;
    assert!(matches!(
        state,
        FlowState::Succeeded {
            redirect: Some(Redirect {
                path: "/login",
                after,
            }),
            ..
        } if *after == Duration::from_secs(3)
    ));

    // sessions opened before the reset are gone
    assert_eq!(
        old_session.list_orders().await.unwrap_err().status(),
        Some(401)
    );
    assert!(client.login("marco", PASSWORD).await.is_err());
    client.login("marco", "fresh-powder-7").await?;

    // the token is single use
    let mut replay = ResetPasswordFlow::from_link(&link);
    let state = replay.submit(&client, "another-pass-9", "another-pass-9").await;
    assert!(matches!(state, FlowState::Failed { .. }));

    Ok(())
}

#[tokio::test]
async fn test_order_board_shows_server_estimates() -> TestResult {
    let server = spawn_server().await?;
    let client = logged_in(&server, "marco").await?;

    let recipe = client
        .create_recipe(&NewRecipe {
            name: "Goulash".to_string(),
            ingredients: vec![RecipeIngredient {
                name: "Beef".to_string(),
                quantity: 0.25,
                unit: "kg".to_string(),
                unit_cost: 20.0,
            }],
        })
        .await?;
    assert_eq!(recipe.cost_per_unit, 5.0);

    let order = client
        .create_order(&NewOrder {
            customer_name: "Summit Hut".to_string(),
            order_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            delivery_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            items: vec![OrderLine {
                recipe_id: recipe.id,
                quantity: 4,
            }],
        })
        .await?;
    assert_eq!(order.total_cost, 20.0);

    let board = OrderBoard::load(&client).await;
    assert!(board.banner.is_none());
    assert_eq!(board.cards.len(), 1);
    assert_eq!(board.cards[0].total, "$20.00");
    assert_eq!(board.cards[0].ingredients, vec!["Beef: 1.00 kg".to_string()]);

    client.delete_order(order.id).await?;
    assert!(client.list_orders().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_malformed_requests_get_message_bodies() -> TestResult {
    let server = spawn_server().await?;
    let http = reqwest::Client::new();

    let broken = http
        .post(format!("{}/api/auth/login", server.base_url))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(broken.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ErrorBody = broken.json().await?;
    assert!(!body.message.is_empty());

    let missing_field = http
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&serde_json::json!({ "username": "anna" }))
        .send()
        .await?;
    assert_eq!(missing_field.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ErrorBody = missing_field.json().await?;
    assert!(body.message.contains("password"));

    let client = logged_in(&server, "anna").await?;
    let bad_id = http
        .delete(format!("{}/api/orders/not-a-number", server.base_url))
        .bearer_auth(client.token().unwrap_or_default())
        .send()
        .await?;
    assert_eq!(bad_id.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ErrorBody = bad_id.json().await?;
    assert!(!body.message.is_empty());

    Ok(())
}
