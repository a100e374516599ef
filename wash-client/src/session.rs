//! Authentication sessions
//!
//! Explicit session objects owned by the caller. Each holds the HTTP client
//! (whose bearer token it manages), the token store, and the signed-in
//! identity. Screens receive the session instead of reaching for a global.

use shared::client::AdminProfile;
use shared::models::AppUser;

use crate::api::{AdminApi, AppApi};
use crate::http::HttpClient;
use crate::token_store::{ADMIN_TOKEN_KEY, APP_TOKEN_KEY, TokenStore};
use crate::{ClientError, ClientResult};

/// Admin dashboard session
pub struct AdminSession<C: HttpClient, S: TokenStore> {
    http: C,
    store: S,
    profile: Option<AdminProfile>,
}

impl<C: HttpClient, S: TokenStore> AdminSession<C, S> {
    /// Signed-out session; call [`restore`](Self::restore) to pick up a stored token
    pub fn new(http: C, store: S) -> Self {
        http.set_token(None);
        Self {
            http,
            store,
            profile: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.http
    }

    pub fn api(&self) -> AdminApi<'_, C> {
        AdminApi::new(&self.http)
    }

    pub fn profile(&self) -> Option<&AdminProfile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    pub fn is_super_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(AdminProfile::is_super_admin)
    }

    /// Validate a stored token against `/auth/me`
    ///
    /// Any failure clears the stored token and the auth header and leaves
    /// the session signed out.
    pub async fn restore(&mut self) -> ClientResult<Option<&AdminProfile>> {
        let Some(token) = self.store.load(ADMIN_TOKEN_KEY) else {
            return Ok(None);
        };
        self.http.set_token(Some(token));
        let result = self.api().me().await;
        match result {
            Ok(profile) => {
                tracing::info!(email = %profile.email, role = %profile.role, "Admin session restored");
                self.profile = Some(profile);
                Ok(self.profile.as_ref())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored admin token rejected, signing out");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Sign in and persist the token
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&AdminProfile> {
        let resp = self.api().login(email, password).await?;
        if resp.access_token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing access token".into()));
        }
        self.store.save(ADMIN_TOKEN_KEY, &resp.access_token)?;
        self.http.set_token(Some(resp.access_token.clone()));
        let profile = resp.profile();
        tracing::info!(email = %profile.email, role = %profile.role, "Admin logged in");
        Ok(self.profile.insert(profile))
    }

    /// Drop the token locally; the backend keeps no session state
    pub fn logout(&mut self) -> ClientResult<()> {
        if let Some(profile) = &self.profile {
            tracing::info!(email = %profile.email, "Admin logged out");
        }
        self.clear()
    }

    /// Route guard: signed-in profile or `Unauthorized`
    pub fn require_auth(&self) -> ClientResult<&AdminProfile> {
        self.profile
            .as_ref()
            .ok_or_else(|| ClientError::Unauthorized("Not logged in".into()))
    }

    /// Role gate for network-wide screens
    ///
    /// Client-side convenience only; the backend enforces roles on its own.
    pub fn require_super_admin(&self) -> ClientResult<&AdminProfile> {
        let profile = self.require_auth()?;
        if !profile.is_super_admin() {
            return Err(ClientError::Forbidden(format!(
                "{} cannot access this section",
                profile.role
            )));
        }
        Ok(profile)
    }

    /// React to a failed request: an expired session signs out
    pub fn handle_error(&mut self, err: &ClientError) -> ClientResult<()> {
        if err.is_session_expired() && self.profile.is_some() {
            tracing::warn!("Session expired");
            self.clear()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> ClientResult<()> {
        self.profile = None;
        self.http.set_token(None);
        self.store.remove(ADMIN_TOKEN_KEY)?;
        Ok(())
    }
}

/// Mobile app session (phone + OTP)
pub struct AppSession<C: HttpClient, S: TokenStore> {
    http: C,
    store: S,
    user: Option<AppUser>,
    authenticated: bool,
}

impl<C: HttpClient, S: TokenStore> AppSession<C, S> {
    pub fn new(http: C, store: S) -> Self {
        http.set_token(None);
        Self {
            http,
            store,
            user: None,
            authenticated: false,
        }
    }

    pub fn client(&self) -> &C {
        &self.http
    }

    pub fn api(&self) -> AppApi<'_, C> {
        AppApi::new(&self.http)
    }

    pub fn user(&self) -> Option<&AppUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Validate a stored token against `/app/me`; failures sign out
    pub async fn restore(&mut self) -> ClientResult<bool> {
        let Some(token) = self.store.load(APP_TOKEN_KEY) else {
            return Ok(false);
        };
        self.http.set_token(Some(token));
        let result = self.api().me().await;
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.authenticated = true;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored app token rejected, signing out");
                self.logout()?;
                Ok(false)
            }
        }
    }

    /// Request an OTP; returns the development code when the backend sends one
    pub async fn request_otp(&self, phone: &str) -> ClientResult<Option<String>> {
        let resp = self.api().request_otp(phone).await?;
        Ok(resp.dev_otp.filter(|otp| !otp.is_empty()))
    }

    /// Verify the OTP and persist the access token
    ///
    /// Returns whether the phone registered a new user (profile still empty).
    pub async fn verify_otp(&mut self, phone: &str, otp: &str) -> ClientResult<bool> {
        let resp = self.api().verify_otp(phone, otp).await?;
        self.store.save(APP_TOKEN_KEY, &resp.access_token)?;
        self.http.set_token(Some(resp.access_token));
        self.authenticated = true;
        tracing::info!(new_user = resp.is_new_user, "App user logged in");
        Ok(resp.is_new_user)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.user = None;
        self.authenticated = false;
        self.http.set_token(None);
        self.store.remove(APP_TOKEN_KEY)?;
        Ok(())
    }
}
