//! Login, forgot-password and reset-password flows.
//!
//! Each flow is an independent state machine: `Idle` until submitted, then
//! `Submitting`, then `Succeeded` or `Failed`. A failed flow accepts another
//! submission just like an idle one. Nothing here renders; a UI binds to
//! [`FlowState`] and follows [`Redirect`]s.
//!
//! `submit` runs a whole round trip. A UI that shows the `Submitting` state
//! calls `begin`, sends the request itself and hands the result to `finish`.

use super::{ApiClient, ClientError, ClientResult, SessionStore, StoredSession};
use crate::{
    api::routes::MessageResponse,
    core::{auth::MIN_PASSWORD_LENGTH, user::UserProfile},
    entities::Role,
};
use std::time::Duration;
use tracing::{debug, info};

/// Login screen
pub const LOGIN_PATH: &str = "/login";
/// Landing page for non-admin users
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Landing page for admins
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";
/// Delay before leaving the reset screen after a successful reset
pub const RESET_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Navigation requested by a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    /// Target path
    pub path: &'static str,
    /// How long to wait before navigating
    pub after: Duration,
}

impl Redirect {
    /// Navigate to `path` right away.
    #[must_use]
    pub const fn now(path: &'static str) -> Self {
        Self {
            path,
            after: Duration::ZERO,
        }
    }
}

/// State of a flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for input
    Idle,
    /// Request in flight
    Submitting,
    /// Done
    Succeeded {
        /// Message to show, if any
        message: Option<String>,
        /// Where to go next, if anywhere
        redirect: Option<Redirect>,
    },
    /// Rejected; the message explains why
    Failed {
        /// Message to show
        message: String,
    },
}

impl FlowState {
    fn failed(err: &ClientError) -> Self {
        Self::Failed {
            message: err.banner(),
        }
    }
}

/// Where a user with `role` lands after login.
#[must_use]
pub const fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD_PATH,
        Role::Manager | Role::Staff => DASHBOARD_PATH,
    }
}

/// Login form
#[derive(Debug)]
pub struct LoginFlow {
    state: FlowState,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }
}

impl LoginFlow {
    /// Current state
    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Logs in; on success the token goes onto `client` and, together with
    /// the profile, into `store`.
    pub async fn submit(
        &mut self,
        client: &mut ApiClient,
        store: &dyn SessionStore,
        login: &str,
        password: &str,
    ) -> &FlowState {
        if !self.begin() {
            return &self.state;
        }
        let outcome = Self::attempt(client, store, login, password).await;
        self.finish(outcome)
    }

    /// Enters `Submitting`. Returns `false` when a submission is already in
    /// flight.
    pub fn begin(&mut self) -> bool {
        if self.state == FlowState::Submitting {
            return false;
        }
        self.state = FlowState::Submitting;
        true
    }

    /// Settles the flow with the outcome of [`LoginFlow::attempt`].
    pub fn finish(&mut self, outcome: ClientResult<UserProfile>) -> &FlowState {
        self.state = match outcome {
            Ok(profile) => {
                info!("Logged in as {}", profile.username);
                FlowState::Succeeded {
                    message: None,
                    redirect: Some(Redirect::now(landing_path(profile.role))),
                }
            }
            Err(err) => {
                debug!("Login failed: {}", err);
                FlowState::failed(&err)
            }
        };
        &self.state
    }

    /// Logs in and persists the session without touching any flow state.
    pub async fn attempt(
        client: &mut ApiClient,
        store: &dyn SessionStore,
        login: &str,
        password: &str,
    ) -> ClientResult<UserProfile> {
        let response = client.login(login, password).await?;
        store.save(&StoredSession {
            auth_token: Some(response.token.clone()),
            user_info: Some(response.user.clone()),
        })?;
        client.set_token(response.token);
        Ok(response.user)
    }
}

/// Logs out on the server and forgets the local session. The local session
/// is cleared even when the server call fails.
pub async fn logout(client: &mut ApiClient, store: &dyn SessionStore) -> ClientResult<()> {
    let remote = if client.token().is_some() {
        client.logout().await
    } else {
        Ok(())
    };
    client.clear_token();
    store.clear()?;
    remote
}

/// Forgot-password form
#[derive(Debug)]
pub struct ForgotPasswordFlow {
    state: FlowState,
}

impl Default for ForgotPasswordFlow {
    fn default() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }
}

impl ForgotPasswordFlow {
    /// Current state
    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Requests a reset link for `email`.
    pub async fn submit(&mut self, client: &ApiClient, email: &str) -> &FlowState {
        if !self.begin() {
            return &self.state;
        }
        let outcome = client.forgot_password(email.trim()).await;
        self.finish(outcome)
    }

    /// Enters `Submitting`. Returns `false` when a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.state == FlowState::Submitting {
            return false;
        }
        self.state = FlowState::Submitting;
        true
    }

    /// Settles the flow with the server's answer.
    pub fn finish(&mut self, outcome: ClientResult<MessageResponse>) -> &FlowState {
        self.state = match outcome {
            Ok(response) => FlowState::Succeeded {
                message: Some(response.message),
                redirect: None,
            },
            Err(err) => FlowState::failed(&err),
        };
        &self.state
    }
}

/// Reset-password form, opened from a reset link
#[derive(Debug)]
pub struct ResetPasswordFlow {
    token: Option<String>,
    state: FlowState,
}

impl ResetPasswordFlow {
    /// A form for `token`; `None` when the link carried no token.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            state: FlowState::Idle,
        }
    }

    /// A form for the token embedded in a reset link.
    #[must_use]
    pub fn from_link(link: &str) -> Self {
        Self::new(crate::core::auth::token_from_link(link).map(str::to_string))
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.token.is_some() && self.state != FlowState::Submitting
    }

    /// Checks the form locally.
    pub fn validate(password: &str, confirmation: &str) -> ClientResult<()> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ClientError::Validation {
                message: format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
            });
        }
        if password != confirmation {
            return Err(ClientError::Validation {
                message: "Passwords do not match".to_string(),
            });
        }
        Ok(())
    }

    /// The token the form was opened with
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Submits the new password. Local validation failures and a missing
    /// token never reach the network.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        password: &str,
        confirmation: &str,
    ) -> &FlowState {
        let Some(token) = self.begin(password, confirmation) else {
            return &self.state;
        };
        let outcome = client.reset_password(&token, password).await;
        self.finish(outcome)
    }

    /// Checks the token and the form, then enters `Submitting` and returns
    /// the token to send. A failed check leaves the flow `Failed`; a request
    /// already in flight leaves it untouched. Either way the result is `None`.
    pub fn begin(&mut self, password: &str, confirmation: &str) -> Option<String> {
        if self.state == FlowState::Submitting {
            return None;
        }
        let Some(token) = self.token.clone() else {
            self.state = FlowState::Failed {
                message: "Invalid or missing reset token".to_string(),
            };
            return None;
        };
        if let Err(err) = Self::validate(password, confirmation) {
            self.state = FlowState::failed(&err);
            return None;
        }
        self.state = FlowState::Submitting;
        Some(token)
    }

    /// Settles the flow with the server's answer.
    pub fn finish(&mut self, outcome: ClientResult<MessageResponse>) -> &FlowState {
        self.state = match outcome {
            Ok(response) => FlowState::Succeeded {
                message: Some(response.message),
                redirect: Some(Redirect {
                    path: LOGIN_PATH,
                    after: RESET_REDIRECT_DELAY,
                }),
            },
            Err(err) => FlowState::failed(&err),
        };
        &self.state
    }
}
