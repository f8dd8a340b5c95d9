//! HR management screen: the role gate and the user list with role changes.
//!
//! The gate only decides what to show. The server enforces the same rule on
//! every user-management call.

use super::{
    ApiClient, ClientResult, SessionStore, StoredSession,
    flows::{DASHBOARD_PATH, LOGIN_PATH},
};
use crate::{core::user::UserProfile, entities::Role};
use tracing::warn;

/// Outcome of entering the HR screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// No cached user; go to `path` (the login screen)
    RedirectToLogin {
        /// Target path
        path: &'static str,
    },
    /// Logged in but not an admin; go to `path` (the dashboard)
    RedirectToDashboard {
        /// Target path
        path: &'static str,
    },
    /// Admin; show the screen
    Allowed(UserProfile),
}

/// Decides access from the locally cached user info.
#[must_use]
pub fn role_gate(store: &dyn SessionStore) -> Gate {
    let cached = store.load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable session: {}", e);
        StoredSession::default()
    });
    match cached.user_info {
        None => Gate::RedirectToLogin { path: LOGIN_PATH },
        Some(user) if user.role != Role::Admin => Gate::RedirectToDashboard {
            path: DASHBOARD_PATH,
        },
        Some(user) => Gate::Allowed(user),
    }
}

/// The user list of the HR screen
#[derive(Debug, Clone, Default)]
pub struct UserRoster {
    users: Vec<UserProfile>,
    banner: Option<String>,
}

impl UserRoster {
    /// Fetches all users.
    pub async fn load(client: &ApiClient) -> ClientResult<Self> {
        Ok(Self {
            users: client.list_users().await?,
            banner: None,
        })
    }

    /// Users as last fetched or patched
    #[must_use]
    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    /// Error from the last failed action
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Changes the role of `user_id` once the action is `confirmed`.
    ///
    /// On success the matching entry is replaced with the server's answer;
    /// on failure the banner is set and the list stays as it was. Returns
    /// whether the change went through.
    pub async fn change_role(
        &mut self,
        client: &ApiClient,
        user_id: i64,
        role: Role,
        confirmed: bool,
    ) -> bool {
        if !confirmed {
            return false;
        }
        match client.change_role(user_id, role).await {
            Ok(updated) => {
                if let Some(entry) = self.users.iter_mut().find(|u| u.id == updated.id) {
                    *entry = updated;
                }
                self.banner = None;
                true
            }
            Err(err) => {
                self.banner = Some(format!("Failed to update role: {}", err.banner()));
                false
            }
        }
    }
}
