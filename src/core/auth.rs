//! Authentication - registration, login sessions and password resets.
//!
//! Passwords are stored as bcrypt hashes and only ever verified against them.
//! Sessions are opaque bearer tokens with a fixed lifetime. Reset tokens are
//! single-use; only their SHA-256 is persisted and the plaintext leaves the
//! server through a [`ResetDelivery`] implementation, never an HTTP response.

use crate::{
    core::employee,
    entities::{PasswordReset, Role, Session, User, password_reset, session, user},
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use sea_orm::{Condition, Set, prelude::*};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Minimum accepted password length, checked by client and server alike
pub const MIN_PASSWORD_LENGTH: usize = 8;

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const INVALID_RESET_TOKEN: &str = "Reset token is invalid or has expired";

/// Hashes a password with the given bcrypt cost on the blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Checks a password against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

/// Rejects passwords shorter than [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Input for creating a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Business identifier of the employee this account belongs to
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Creates a user linked to an existing employee.
///
/// Fails with [`Error::NotFound`] for an unknown employee and with
/// [`Error::Duplicate`] when the username, email or employee is taken.
pub async fn create_user(
    db: &DatabaseConnection,
    new: NewUser,
    role: Role,
    bcrypt_cost: u32,
) -> Result<user::Model> {
    let username = new.username.trim();
    let email = new.email.trim().to_lowercase();
    if username.is_empty() {
        return Err(Error::validation("Username cannot be empty"));
    }
    if !email.contains('@') {
        return Err(Error::validation(format!("Invalid email address: {email}")));
    }
    validate_password(&new.password)?;

    let employee = employee::get_employee_by_employee_id(db, new.employee_id.trim())
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Employee",
            id: new.employee_id.clone(),
        })?;

    let taken = User::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(username))
                .add(user::Column::Email.eq(email.as_str()))
                .add(user::Column::EmployeeRef.eq(employee.id)),
        )
        .one(db)
        .await?;
    if let Some(existing) = taken {
        let (field, value) = if existing.username == username {
            ("username", username.to_string())
        } else if existing.email == email {
            ("email", email)
        } else {
            ("employeeID", new.employee_id)
        };
        return Err(Error::Duplicate { field, value });
    }

    let password_hash = hash_password(&new.password, bcrypt_cost).await?;
    let account = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.clone()),
        password_hash: Set(password_hash),
        role: Set(role),
        employee_ref: Set(employee.id),
        first_name: Set(new.first_name.trim().to_string()),
        last_name: Set(new.last_name.trim().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = account
        .insert(db)
        .await
        .map_err(|e| Error::from_insert(e, "username", username))?;
    info!("Created {} account {}", created.role, created.username);
    Ok(created)
}

/// Self-service registration; new accounts always start as staff.
pub async fn register(
    db: &DatabaseConnection,
    new: NewUser,
    bcrypt_cost: u32,
) -> Result<user::Model> {
    create_user(db, new, Role::Staff, bcrypt_cost).await
}

/// Verifies credentials and opens a session.
///
/// `login` matches either the username or the email. Unknown accounts and
/// wrong passwords produce the same [`Error::Unauthorized`].
pub async fn login(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
    session_ttl: Duration,
) -> Result<(session::Model, user::Model)> {
    let login = login.trim();
    let account = User::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(login))
                .add(user::Column::Email.eq(login.to_lowercase())),
        )
        .one(db)
        .await?;

    let Some(account) = account else {
        debug!("Login attempt for unknown account {}", login);
        return Err(Error::Unauthorized {
            message: INVALID_CREDENTIALS.to_string(),
        });
    };
    if !verify_password(password, &account.password_hash).await? {
        warn!("Wrong password for {}", account.username);
        return Err(Error::Unauthorized {
            message: INVALID_CREDENTIALS.to_string(),
        });
    }

    let now = Utc::now();
    let session = session::ActiveModel {
        token: Set(new_token()),
        user_id: Set(account.id),
        created_at: Set(now),
        expires_at: Set(now + session_ttl),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("{} logged in", account.username);
    Ok((session, account))
}

/// Resolves a bearer token to its user.
///
/// Expired sessions are deleted on sight.
pub async fn authenticate(db: &DatabaseConnection, token: &str) -> Result<user::Model> {
    let unauthorized = || Error::Unauthorized {
        message: "Session is invalid or has expired".to_string(),
    };

    let session = Session::find()
        .filter(session::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or_else(unauthorized)?;

    if session.expires_at <= Utc::now() {
        debug!("Session {} expired", session.id);
        Session::delete_by_id(session.id).exec(db).await?;
        return Err(unauthorized());
    }

    User::find_by_id(session.user_id)
        .one(db)
        .await?
        .ok_or_else(unauthorized)
}

/// Ends the session identified by `token`. Unknown tokens are ignored.
pub async fn logout(db: &DatabaseConnection, token: &str) -> Result<()> {
    Session::delete_many()
        .filter(session::Column::Token.eq(token))
        .exec(db)
        .await?;
    Ok(())
}

/// Where reset tokens go once issued.
pub trait ResetDelivery: Send + Sync {
    /// Hands `link` (which embeds the token) to the owner of `account`.
    fn deliver(&self, account: &user::Model, link: &str);
}

/// Delivery that writes the reset link to the log; for development setups
/// without a mail relay.
#[derive(Debug, Default)]
pub struct LogDelivery;

impl ResetDelivery for LogDelivery {
    fn deliver(&self, account: &user::Model, link: &str) {
        info!("Password reset requested for {}: {}", account.email, link);
    }
}

/// Delivery that keeps links in memory, newest last.
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    links: Mutex<Vec<(String, String)>>,
}

impl MemoryDelivery {
    /// Most recent link delivered to `email`.
    #[must_use]
    pub fn last_link_for(&self, email: &str) -> Option<String> {
        self.links.lock().ok().and_then(|links| {
            links
                .iter()
                .rev()
                .find(|(to, _)| to == email)
                .map(|(_, link)| link.clone())
        })
    }
}

impl ResetDelivery for MemoryDelivery {
    fn deliver(&self, account: &user::Model, link: &str) {
        if let Ok(mut links) = self.links.lock() {
            links.push((account.email.clone(), link.to_string()));
        }
    }
}

/// Builds the reset link for `token`.
#[must_use]
pub fn reset_link(base: &str, token: &str) -> String {
    format!("{base}?token={token}")
}

/// Extracts the token from a reset link built by [`reset_link`].
#[must_use]
pub fn token_from_link(link: &str) -> Option<&str> {
    link.split_once("?token=").map(|(_, token)| token)
}

/// Issues a reset token for the account with `email` and delivers it.
///
/// Unknown emails are not an error, so callers cannot probe which
/// addresses exist; nothing is delivered in that case.
pub async fn request_password_reset(
    db: &DatabaseConnection,
    email: &str,
    token_ttl: Duration,
    link_base: &str,
    delivery: &dyn ResetDelivery,
) -> Result<()> {
    let email = email.trim().to_lowercase();
    let Some(account) = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?
    else {
        debug!("Password reset requested for unknown email");
        return Ok(());
    };

    let token = new_token();
    password_reset::ActiveModel {
        token_hash: Set(hash_token(&token)),
        user_id: Set(account.id),
        expires_at: Set(Utc::now() + token_ttl),
        used: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await?;

    delivery.deliver(&account, &reset_link(link_base, &token));
    Ok(())
}

/// Sets a new password using a reset token.
///
/// The token must be unused and unexpired; it is consumed on success and
/// every open session of the account is closed.
pub async fn reset_password(
    db: &DatabaseConnection,
    token: &str,
    new_password: &str,
    bcrypt_cost: u32,
) -> Result<()> {
    validate_password(new_password)?;

    let reset = PasswordReset::find()
        .filter(password_reset::Column::TokenHash.eq(hash_token(token.trim())))
        .filter(password_reset::Column::Used.eq(false))
        .one(db)
        .await?
        .filter(|reset| reset.expires_at > Utc::now())
        .ok_or_else(|| Error::validation(INVALID_RESET_TOKEN))?;

    let account = User::find_by_id(reset.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::validation(INVALID_RESET_TOKEN))?;

    let user_id = account.id;
    let mut active: user::ActiveModel = account.into();
    active.password_hash = Set(hash_password(new_password, bcrypt_cost).await?);
    active.update(db).await?;

    let mut reset: password_reset::ActiveModel = reset.into();
    reset.used = Set(true);
    reset.update(db).await?;

    Session::delete_many()
        .filter(session::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    info!("Password reset for user {}", user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::settings::MIN_BCRYPT_COST, test_utils::*};

    #[tokio::test]
    async fn test_password_hashing_off_the_runtime() -> Result<()> {
        let hash = hash_password("snowfall-42", MIN_BCRYPT_COST).await?;
        assert_ne!(hash, "snowfall-42");
        assert!(verify_password("snowfall-42", &hash).await?);
        assert!(!verify_password("snowfall-43", &hash).await?);

        let garbage = verify_password("snowfall-42", "not-a-bcrypt-hash").await;
        assert!(matches!(garbage, Err(Error::PasswordHash(_))));
        Ok(())
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_reset_link_round_trip() {
        let link = reset_link("http://localhost:3000/reset-password", "abc123");
        assert_eq!(token_from_link(&link), Some("abc123"));
    }

    #[tokio::test]
    async fn test_register_links_employee_and_hashes_password() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_user(&db, "EMP001", "anna", Role::Admin).await?;

        let stored = User::find_by_id(account.id).one(&db).await?.unwrap();
        assert_ne!(stored.password_hash, TEST_PASSWORD);
        assert!(verify_password(TEST_PASSWORD, &stored.password_hash).await?);

        // registration never grants more than staff
        let registered = register(&db, new_user("EMP002", "marco"), MIN_BCRYPT_COST).await;
        assert!(matches!(
            registered,
            Err(Error::NotFound {
                entity: "Employee",
                ..
            })
        ));

        employee::create_employee(&db, new_employee("EMP002", "Marco")).await?;
        let registered = register(&db, new_user("EMP002", "marco"), MIN_BCRYPT_COST).await?;
        assert_eq!(registered.role, Role::Staff);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_accounts_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "EMP001", "anna", Role::Staff).await?;
        employee::create_employee(&db, new_employee("EMP002", "Other")).await?;

        let same_name = register(&db, new_user("EMP002", "anna"), MIN_BCRYPT_COST).await;
        assert!(matches!(
            same_name,
            Err(Error::Duplicate {
                field: "username",
                ..
            })
        ));

        let same_employee = register(&db, new_user("EMP001", "second"), MIN_BCRYPT_COST).await;
        assert!(matches!(
            same_employee,
            Err(Error::Duplicate {
                field: "employeeID",
                ..
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_and_authenticate() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_user(&db, "EMP001", "anna", Role::Staff).await?;

        let wrong = login(&db, "anna", "not the password", Duration::hours(1)).await;
        assert!(matches!(wrong, Err(Error::Unauthorized { .. })));
        let unknown = login(&db, "nobody", TEST_PASSWORD, Duration::hours(1)).await;
        assert!(matches!(unknown, Err(Error::Unauthorized { .. })));

        let (session, logged_in) =
            login(&db, "ANNA@example.com", TEST_PASSWORD, Duration::hours(1)).await?;
        assert_eq!(logged_in.id, account.id);

        let resolved = authenticate(&db, &session.token).await?;
        assert_eq!(resolved.id, account.id);

        logout(&db, &session.token).await?;
        assert!(matches!(
            authenticate(&db, &session.token).await,
            Err(Error::Unauthorized { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_session_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "EMP001", "anna", Role::Staff).await?;

        let (session, _) = login(&db, "anna", TEST_PASSWORD, Duration::seconds(-1)).await?;
        assert!(matches!(
            authenticate(&db, &session.token).await,
            Err(Error::Unauthorized { .. })
        ));
        assert!(Session::find_by_id(session.id).one(&db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_password_reset_flow() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "EMP001", "anna", Role::Staff).await?;
        let (session, _) = login(&db, "anna", TEST_PASSWORD, Duration::hours(1)).await?;

        let delivery = MemoryDelivery::default();
        let ttl = Duration::hours(1);
        request_password_reset(&db, "nobody@example.com", ttl, "http://x/reset", &delivery).await?;
        assert!(delivery.last_link_for("nobody@example.com").is_none());

        request_password_reset(&db, "anna@example.com", ttl, "http://x/reset", &delivery).await?;
        let link = delivery.last_link_for("anna@example.com").unwrap();
        let token = token_from_link(&link).unwrap().to_string();

        let too_short = reset_password(&db, &token, "short", MIN_BCRYPT_COST).await;
        assert!(matches!(too_short, Err(Error::Validation { .. })));

        reset_password(&db, &token, "brand-new-secret", MIN_BCRYPT_COST).await?;

        // old sessions are closed and the old password no longer works
        assert!(authenticate(&db, &session.token).await.is_err());
        assert!(login(&db, "anna", TEST_PASSWORD, ttl).await.is_err());
        login(&db, "anna", "brand-new-secret", ttl).await?;

        // single use
        let reused = reset_password(&db, &token, "another-secret", MIN_BCRYPT_COST).await;
        assert!(matches!(reused, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_reset_token_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "EMP001", "anna", Role::Staff).await?;

        let delivery = MemoryDelivery::default();
        let ttl = Duration::seconds(-1);
        request_password_reset(&db, "anna@example.com", ttl, "http://x/reset", &delivery).await?;
        let link = delivery.last_link_for("anna@example.com").unwrap();
        let token = token_from_link(&link).unwrap();

        let result = reset_password(&db, token, "brand-new-secret", MIN_BCRYPT_COST).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }
}
