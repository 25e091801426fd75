//! Session state: the signed-in user and their token.

use blog_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserDto};

use crate::api::ApiClient;
use crate::error::Result;
use crate::session::SessionStore;

pub struct AuthStore<S> {
    api: ApiClient,
    session: S,
    pub user: Option<UserDto>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<S: SessionStore> AuthStore<S> {
    pub fn new(api: ApiClient, session: S) -> Self {
        Self {
            api,
            session,
            user: None,
            token: None,
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Restore a saved token and load its user.
    pub async fn initialize(&mut self) {
        match self.session.load() {
            Ok(Some(token)) => {
                self.token = Some(token);
                self.fetch_user().await;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read saved session"),
        }
    }

    pub async fn login(&mut self, request: &LoginRequest) -> Result<UserDto> {
        self.loading = true;
        self.error = None;
        let result = self.api.login(request).await;
        self.loading = false;

        self.accept(result, "Login failed")
    }

    pub async fn register(&mut self, request: &RegisterUserRequest) -> Result<UserDto> {
        self.loading = true;
        self.error = None;
        let result = self.api.register(request).await;
        self.loading = false;

        self.accept(result, "Registration failed")
    }

    fn accept(&mut self, result: Result<AuthResponse>, fallback: &str) -> Result<UserDto> {
        match result {
            Ok(AuthResponse { token, user }) => {
                self.session.save(&token)?;
                self.token = Some(token);
                self.user = Some(user.clone());
                Ok(user)
            }
            Err(err) => {
                self.error = Some(err.message().unwrap_or(fallback).to_string());
                Err(err)
            }
        }
    }

    /// Refresh `user` from the server. Any failure ends the session.
    pub async fn fetch_user(&mut self) {
        let Some(token) = self.token.clone() else {
            return;
        };

        match self.api.me(&token).await {
            Ok(user) => self.user = Some(user),
            Err(err) => {
                tracing::debug!(error = %err, "Session rejected, logging out");
                self.logout().await;
            }
        }
    }

    /// Always clears the local session, whatever the server says.
    pub async fn logout(&mut self) {
        if let Some(token) = self.token.take() {
            if let Err(err) = self.api.logout(&token).await {
                tracing::debug!(error = %err, "Ignoring logout failure");
            }
        }
        self.user = None;
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to clear saved session");
        }
    }
}

impl<S> std::fmt::Debug for AuthStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("user", &self.user)
            .field("authenticated", &self.token.is_some())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}
