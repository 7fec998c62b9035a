//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (catalog search,
//! authorization, HTTP) into the shared song library. Desktop apps typically
//! enable the `desktop-shims` feature, which falls back to the iTunes Search
//! API over `bridge-desktop`'s reqwest client when no catalog provider is
//! injected. iOS hosts inject a MusicKit-backed provider instead.

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::{
    authorization::{AuthorizationProvider, AuthorizationStatus},
    catalog::{CatalogSearchProvider, Song},
};
use core_library::{InMemorySongRepository, SongRepository};
use core_runtime::config::CoreConfig;
use core_runtime::events::{EventBus, EventStream};
use tracing::{debug, info, instrument};

#[cfg(feature = "desktop-shims")]
use bridge_desktop::ReqwestHttpClient;
#[cfg(feature = "desktop-shims")]
use provider_itunes::ItunesCatalogProvider;

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    library: Arc<dyn SongRepository>,
    events: EventBus,
    authorization: Option<Arc<dyn AuthorizationProvider>>,
}

impl CoreService {
    /// Validate `config`, resolve the catalog provider and build the library.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Runtime`] if the configuration is invalid
    /// - [`CoreError::CapabilityMissing`] if no catalog provider was injected
    ///   and the `desktop-shims` feature is disabled
    /// - [`CoreError::Bridge`] if the default HTTP client cannot be built
    pub fn bootstrap(config: CoreConfig) -> Result<Self> {
        config.validate()?;

        let provider = resolve_catalog_provider(&config)?;
        info!(provider = provider.name(), "Bootstrapping core service");

        let events = EventBus::new(config.event_buffer_size);
        let library =
            InMemorySongRepository::new(provider, config.library).with_event_bus(events.clone());

        Ok(Self {
            library: Arc::new(library),
            events,
            authorization: config.authorization_provider.clone(),
        })
    }

    /// The song repository backing this service.
    pub fn library(&self) -> Arc<dyn SongRepository> {
        Arc::clone(&self.library)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to library and search events.
    pub fn subscribe(&self) -> EventStream {
        self.events.stream()
    }

    /// Search the catalog with the configured default limit.
    ///
    /// The term is trimmed; a blank term returns no songs without touching
    /// the provider.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotAuthorized`] if an authorization provider is
    ///   configured and reports anything other than `Authorized`
    /// - [`CoreError::Library`] if the catalog search fails
    pub async fn search(&self, term: &str) -> Result<Vec<Song>> {
        self.search_with_limit(term, None).await
    }

    #[instrument(skip(self))]
    pub async fn search_with_limit(&self, term: &str, limit: Option<u32>) -> Result<Vec<Song>> {
        let term = term.trim();
        if term.is_empty() {
            debug!("Blank search term, skipping catalog search");
            return Ok(Vec::new());
        }

        if let Some(authorization) = &self.authorization {
            let status = authorization.status().await?;
            if !status.is_authorized() {
                return Err(CoreError::NotAuthorized { status });
            }
        }

        Ok(self.library.search_songs(term, limit).await?)
    }

    /// Cache `song` and move it to the front of the recently played list.
    pub async fn record_playback(&self, song: Song) {
        self.library.add_song(song.clone()).await;
        self.library.add_to_recently_played(song).await;
    }

    /// Flip the favorite state of `song`.
    ///
    /// Returns `true` if the song is a favorite afterwards.
    pub async fn toggle_favorite(&self, song: Song) -> bool {
        self.library.toggle_favorite(song).await
    }

    /// Current catalog authorization status.
    ///
    /// Without an authorization provider the catalog is treated as public and
    /// this reports `Authorized`.
    pub async fn authorization_status(&self) -> Result<AuthorizationStatus> {
        match &self.authorization {
            Some(authorization) => Ok(authorization.status().await?),
            None => Ok(AuthorizationStatus::Authorized),
        }
    }

    pub async fn request_authorization(&self) -> Result<AuthorizationStatus> {
        match &self.authorization {
            Some(authorization) => Ok(authorization.request_authorization().await?),
            None => Ok(AuthorizationStatus::Authorized),
        }
    }
}

fn resolve_catalog_provider(config: &CoreConfig) -> Result<Arc<dyn CatalogSearchProvider>> {
    if let Some(provider) = &config.catalog_provider {
        return Ok(Arc::clone(provider));
    }
    default_catalog_provider(config)
}

#[cfg(feature = "desktop-shims")]
fn default_catalog_provider(config: &CoreConfig) -> Result<Arc<dyn CatalogSearchProvider>> {
    use bridge_traits::http::HttpClient;
    use std::time::Duration;

    let http_client: Arc<dyn HttpClient> = match &config.http_client {
        Some(client) => Arc::clone(client),
        None => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
            config.catalog_api.request_timeout_secs,
        ))?),
    };

    debug!(base_url = %config.catalog_api.base_url, "Using iTunes catalog provider");
    Ok(Arc::new(ItunesCatalogProvider::new(
        http_client,
        config.catalog_api.clone(),
    )))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_catalog_provider(_config: &CoreConfig) -> Result<Arc<dyn CatalogSearchProvider>> {
    Err(CoreConfig::catalog_provider_missing().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use core_runtime::events::{CoreEvent, LibraryEvent};
    use mockall::mock;

    mock! {
        CatalogProvider {}

        #[async_trait]
        impl CatalogSearchProvider for CatalogProvider {
            async fn search(&self, term: &str, limit: u32) -> BridgeResult<Vec<Song>>;
        }
    }

    mock! {
        Authorization {}

        #[async_trait]
        impl AuthorizationProvider for Authorization {
            async fn status(&self) -> BridgeResult<AuthorizationStatus>;
            async fn request_authorization(&self) -> BridgeResult<AuthorizationStatus>;
        }
    }

    fn song(id: &str) -> Song {
        Song::new(id, format!("Song {id}"), "Artist", "Album")
    }

    fn service_with(
        provider: MockCatalogProvider,
        authorization: Option<MockAuthorization>,
    ) -> CoreService {
        let mut builder = CoreConfig::builder().catalog_provider(Arc::new(provider));
        if let Some(authorization) = authorization {
            builder = builder.authorization_provider(Arc::new(authorization));
        }
        CoreService::bootstrap(builder.build().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_search_merges_into_library() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search()
            .withf(|term, limit| term == "adele" && *limit == 20)
            .times(1)
            .returning(|_, _| Ok(vec![song("1"), song("2")]));

        let service = service_with(provider, None);
        let songs = service.search("  adele ").await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(service.library().get_all_songs().await.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_search_skips_provider() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().never();

        let service = service_with(provider, None);

        assert!(service.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_requires_authorization() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().never();

        let mut authorization = MockAuthorization::new();
        authorization
            .expect_status()
            .returning(|| Ok(AuthorizationStatus::Denied));

        let service = service_with(provider, Some(authorization));
        let err = service.search("adele").await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotAuthorized {
                status: AuthorizationStatus::Denied
            }
        ));
    }

    #[tokio::test]
    async fn test_search_failure_is_library_error() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search()
            .returning(|_, _| Err(BridgeError::OperationFailed("offline".into())));

        let service = service_with(provider, None);
        let err = service.search("adele").await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::Library(core_library::LibraryError::CatalogUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_record_playback_caches_song() {
        let service = service_with(MockCatalogProvider::new(), None);

        service.record_playback(song("7")).await;
        service.record_playback(song("8")).await;

        let library = service.library();
        assert!(library.get_song(&"7".into()).await.is_some());
        let recent: Vec<_> = library
            .recently_played_songs()
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(recent, vec!["8".into(), "7".into()]);
    }

    #[tokio::test]
    async fn test_toggle_favorite() {
        let service = service_with(MockCatalogProvider::new(), None);
        let mut stream = service.subscribe();

        assert!(service.toggle_favorite(song("3")).await);
        assert!(service.library().is_favorite(&"3".into()).await);
        assert!(!service.toggle_favorite(song("3")).await);
        assert!(service.library().favorite_songs().await.is_empty());

        let event = stream.recv().await.unwrap();
        assert!(matches!(
            event,
            CoreEvent::Library(LibraryEvent::FavoriteAdded { .. })
        ));
    }

    #[tokio::test]
    async fn test_authorization_defaults_to_authorized() {
        let service = service_with(MockCatalogProvider::new(), None);

        assert_eq!(
            service.authorization_status().await.unwrap(),
            AuthorizationStatus::Authorized
        );
        assert_eq!(
            service.request_authorization().await.unwrap(),
            AuthorizationStatus::Authorized
        );
    }

    #[tokio::test]
    async fn test_request_authorization_delegates() {
        let mut authorization = MockAuthorization::new();
        authorization
            .expect_request_authorization()
            .times(1)
            .returning(|| Ok(AuthorizationStatus::Authorized));

        let service = service_with(MockCatalogProvider::new(), Some(authorization));

        assert_eq!(
            service.request_authorization().await.unwrap(),
            AuthorizationStatus::Authorized
        );
    }

    #[test]
    fn test_bootstrap_rejects_invalid_config() {
        let mut config = CoreConfig::builder()
            .catalog_provider(Arc::new(MockCatalogProvider::new()))
            .build()
            .unwrap();
        config.event_buffer_size = 0;

        assert!(matches!(
            CoreService::bootstrap(config),
            Err(CoreError::Runtime(_))
        ));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_bootstrap_falls_back_to_itunes() {
        let config = CoreConfig::builder().build().unwrap();

        assert!(CoreService::bootstrap(config).is_ok());
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_bootstrap_without_provider_fails() {
        let config = CoreConfig::builder().build().unwrap();

        assert!(matches!(
            CoreService::bootstrap(config),
            Err(CoreError::CapabilityMissing { .. })
        ));
    }
}
