//! Catalog Authorization Abstraction
//!
//! Reports whether the user allowed the app to access the music catalog.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Authorization state reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// The user explicitly refused access
    Denied,
    /// Access is blocked by device policy (parental controls, MDM)
    Restricted,
    /// Catalog access is allowed
    Authorized,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationStatus::Authorized)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuthorizationStatus::NotDetermined => "not_determined",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Authorized => "authorized",
        };
        f.write_str(label)
    }
}

/// Catalog authorization trait
///
/// - **iOS**: MusicKit authorization
/// - **Desktop**: usually a fixed status, public catalogs need no consent
///
/// The core never gates repository operations on this status; callers decide
/// whether to search based on it.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Current authorization status, without prompting the user
    async fn status(&self) -> Result<AuthorizationStatus>;

    /// Ask the user for access if the status is not yet determined
    ///
    /// Returns the resulting status.
    async fn request_authorization(&self) -> Result<AuthorizationStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_authorized() {
        assert!(AuthorizationStatus::Authorized.is_authorized());
        assert!(!AuthorizationStatus::Denied.is_authorized());
        assert!(!AuthorizationStatus::Restricted.is_authorized());
        assert!(!AuthorizationStatus::NotDetermined.is_authorized());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AuthorizationStatus::NotDetermined.to_string(), "not_determined");
        assert_eq!(AuthorizationStatus::Authorized.to_string(), "authorized");
    }
}
