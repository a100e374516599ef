//! Per-invocation state: config, HTTP client and the admin session

use anyhow::{Context as _, Result};
use wash_client::{
    AdminApi, AdminProfile, AdminSession, ClientConfig, ClientError, ClientResult, FileTokenStore,
    NetworkHttpClient,
};

use crate::cli::Cli;

pub struct Context {
    config: ClientConfig,
    session: AdminSession<NetworkHttpClient, FileTokenStore>,
}

impl Context {
    /// Build the client from env and flags, then pick up a stored token
    pub async fn open(cli: &Cli) -> Result<Self> {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &cli.api_url {
            config.base_url = url.clone();
        }
        if let Some(dir) = &cli.storage_dir {
            config = config.with_storage_dir(dir.clone());
        }

        let store = config.token_store();
        store
            .ensure_dir()
            .with_context(|| format!("Cannot create {}", config.storage_dir.display()))?;
        let http = config.build_http_client()?;
        tracing::debug!(api = %config.base_url, "Client configured");

        let mut session = AdminSession::new(http, store);
        session.restore().await?;
        Ok(Self { config, session })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_mut(&mut self) -> &mut AdminSession<NetworkHttpClient, FileTokenStore> {
        &mut self.session
    }

    pub fn api(&self) -> AdminApi<'_, NetworkHttpClient> {
        self.session.api()
    }

    pub fn client(&self) -> &NetworkHttpClient {
        self.session.client()
    }

    pub fn profile(&self) -> Result<&AdminProfile> {
        Ok(self.session.require_auth()?)
    }

    pub fn require_super_admin(&self) -> Result<&AdminProfile> {
        Ok(self.session.require_super_admin()?)
    }

    /// Organization scope of a request; partners always see their own
    pub fn scope(&self, requested: Option<String>) -> Result<Option<String>> {
        let profile = self.profile()?;
        if profile.is_super_admin() {
            return Ok(requested);
        }
        let own = profile.org_id().map(str::to_string);
        if requested.is_some() && requested != own {
            tracing::warn!("Partner accounts are limited to their own organization");
        }
        Ok(own)
    }

    /// Unwrap an API result; a rejected token ends the session
    pub fn check<T>(&mut self, result: ClientResult<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                self.session.handle_error(&e)?;
                Err(e.into())
            }
        }
    }
}

/// Operator-facing text of a command failure
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}
