//! # Core Configuration Module
//!
//! Provides configuration management for the music catalog core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the host capabilities and settings the core needs.
//! Values are validated when the config is built, so a bad setting fails
//! at startup rather than on the first search.
//!
//! ## Capabilities
//!
//! - `CatalogSearchProvider` - Remote song search (desktop default: iTunes Search API)
//! - `AuthorizationProvider` - Catalog access consent (optional)
//! - `HttpClient` - HTTP operations for the default provider (desktop default: reqwest)
//!
//! The catalog provider is resolved by `core-service` at bootstrap: when it is
//! not injected and no desktop default is compiled in, bootstrap fails with
//! [`Error::CapabilityMissing`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, LibrarySettings};
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .catalog_provider(Arc::new(MyCatalogProvider))
//!     .library(LibrarySettings::default().with_recent_capacity(50))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{AuthorizationProvider, CatalogSearchProvider, HttpClient};
use std::sync::Arc;

/// Default number of songs kept in the recently played list
pub const DEFAULT_RECENT_CAPACITY: usize = 20;

/// Largest accepted recently played capacity
pub const MAX_RECENT_CAPACITY: usize = 1000;

/// Default result limit for catalog searches
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Core configuration for the music catalog core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Remote catalog search (optional with desktop default)
    pub catalog_provider: Option<Arc<dyn CatalogSearchProvider>>,

    /// Catalog access consent (optional; searches are not gated when absent)
    pub authorization_provider: Option<Arc<dyn AuthorizationProvider>>,

    /// HTTP client used by the default catalog provider (optional with desktop default)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Song repository settings
    pub library: LibrarySettings,

    /// Catalog API settings for the default provider
    pub catalog_api: CatalogApiConfig,

    /// Capacity of the event bus broadcast channel
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field(
                "catalog_provider",
                &self
                    .catalog_provider
                    .as_ref()
                    .map(|p| format!("CatalogSearchProvider {{ name: {} }}", p.name())),
            )
            .field(
                "authorization_provider",
                &self
                    .authorization_provider
                    .as_ref()
                    .map(|_| "AuthorizationProvider { ... }"),
            )
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field("library", &self.library)
            .field("catalog_api", &self.catalog_api)
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

/// Settings for the in-memory song repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySettings {
    /// Maximum number of recently played songs retained
    pub recent_capacity: usize,

    /// Limit used when a search does not specify one
    pub default_search_limit: u32,

    /// Publish repository changes on the event bus
    pub emit_events: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            default_search_limit: DEFAULT_SEARCH_LIMIT,
            emit_events: true,
        }
    }
}

impl LibrarySettings {
    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent_capacity = capacity;
        self
    }

    pub fn with_default_search_limit(mut self, limit: u32) -> Self {
        self.default_search_limit = limit;
        self
    }

    pub fn with_events(mut self, enabled: bool) -> Self {
        self.emit_events = enabled;
        self
    }

    /// Validates the settings
    pub fn validate(&self) -> Result<()> {
        if self.recent_capacity == 0 {
            return Err(Error::Config(
                "Recently played capacity must be greater than 0".to_string(),
            ));
        }

        if self.recent_capacity > MAX_RECENT_CAPACITY {
            return Err(Error::Config(format!(
                "Recently played capacity exceeds maximum of {}",
                MAX_RECENT_CAPACITY
            )));
        }

        if self.default_search_limit == 0 {
            return Err(Error::Config(
                "Default search limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for the public catalog search API.
///
/// # Example
///
/// ```
/// use core_runtime::config::CatalogApiConfig;
///
/// let config = CatalogApiConfig::new()
///     .with_country("GB")
///     .with_request_timeout_secs(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogApiConfig {
    /// API base URL, without trailing path
    pub base_url: String,

    /// ISO 3166-1 alpha-2 storefront country
    pub country: String,

    /// Media type filter
    pub media: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for CatalogApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com".to_string(),
            country: "US".to_string(),
            media: "music".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl CatalogApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(Error::Config(
                "Catalog base URL must start with http:// or https://".to_string(),
            ));
        }

        if self.country.len() != 2 || !self.country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Config(format!(
                "Catalog country must be a two-letter code, got '{}'",
                self.country
            )));
        }

        if self.media.trim().is_empty() {
            return Err(Error::Config("Catalog media type cannot be empty".to_string()));
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(Error::Config(
                "Catalog request timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.library.validate()?;
        self.catalog_api.validate()?;

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Error returned when no catalog provider is available.
    pub fn catalog_provider_missing() -> Error {
        Error::CapabilityMissing {
            capability: "CatalogSearchProvider".to_string(),
            message: "A CatalogSearchProvider implementation is required for song search. \
                     Desktop: enable the 'desktop-shims' feature to use the iTunes Search API provider. \
                     iOS: inject a MusicKit-backed provider."
                .to_string(),
        }
    }
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    catalog_provider: Option<Arc<dyn CatalogSearchProvider>>,
    authorization_provider: Option<Arc<dyn AuthorizationProvider>>,
    http_client: Option<Arc<dyn HttpClient>>,
    library: Option<LibrarySettings>,
    catalog_api: Option<CatalogApiConfig>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Sets the catalog search provider.
    ///
    /// If not provided, `core-service` falls back to the iTunes provider when
    /// the `desktop-shims` feature is enabled.
    pub fn catalog_provider(mut self, provider: Arc<dyn CatalogSearchProvider>) -> Self {
        self.catalog_provider = Some(provider);
        self
    }

    /// Sets the authorization provider (optional).
    pub fn authorization_provider(mut self, provider: Arc<dyn AuthorizationProvider>) -> Self {
        self.authorization_provider = Some(provider);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// Only used by the default catalog provider.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the song repository settings.
    ///
    /// Default: capacity 20, search limit 20, events enabled
    pub fn library(mut self, settings: LibrarySettings) -> Self {
        self.library = Some(settings);
        self
    }

    /// Sets the recently played capacity.
    pub fn recent_capacity(mut self, capacity: usize) -> Self {
        let settings = self.library.unwrap_or_default();
        self.library = Some(settings.with_recent_capacity(capacity));
        self
    }

    /// Sets the catalog API configuration.
    pub fn catalog_api(mut self, config: CatalogApiConfig) -> Self {
        self.catalog_api = Some(config);
        self
    }

    /// Sets the event bus buffer size.
    ///
    /// Default: 100
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when any setting is out of range.
    pub fn build(self) -> Result<CoreConfig> {
        let config = CoreConfig {
            catalog_provider: self.catalog_provider,
            authorization_provider: self.authorization_provider,
            http_client: self.http_client,
            library: self.library.unwrap_or_default(),
            catalog_api: self.catalog_api.unwrap_or_default(),
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}
