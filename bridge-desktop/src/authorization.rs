//! Fixed-status authorization for desktop hosts

use async_trait::async_trait;
use bridge_traits::{
    authorization::{AuthorizationProvider, AuthorizationStatus},
    error::Result,
};
use tracing::debug;

/// Authorization provider that always reports the same status.
///
/// Desktop builds talk to public catalog endpoints that need no user consent,
/// so the default is [`AuthorizationStatus::Authorized`].
#[derive(Debug, Clone)]
pub struct StaticAuthorizationProvider {
    status: AuthorizationStatus,
}

impl StaticAuthorizationProvider {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self { status }
    }

    pub fn authorized() -> Self {
        Self::new(AuthorizationStatus::Authorized)
    }
}

impl Default for StaticAuthorizationProvider {
    fn default() -> Self {
        Self::authorized()
    }
}

#[async_trait]
impl AuthorizationProvider for StaticAuthorizationProvider {
    async fn status(&self) -> Result<AuthorizationStatus> {
        Ok(self.status)
    }

    async fn request_authorization(&self) -> Result<AuthorizationStatus> {
        debug!(status = %self.status, "Authorization requested on desktop");
        Ok(self.status)
    }
}
