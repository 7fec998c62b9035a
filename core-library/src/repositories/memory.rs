//! In-memory song repository

use crate::error::{LibraryError, Result};
use crate::models::{LibraryStats, Song, SongId};
use crate::repositories::{CatalogCache, Favorites, RecentlyPlayed, SongRepository};
use async_trait::async_trait;
use bridge_traits::catalog::CatalogSearchProvider;
use core_runtime::config::LibrarySettings;
use core_runtime::events::{CoreEvent, EventBus, LibraryEvent, SearchEvent};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// The three containers, always updated together under one lock.
#[derive(Debug)]
struct LibraryState {
    catalog: CatalogCache,
    recent: RecentlyPlayed,
    favorites: Favorites,
}

/// Song repository held entirely in memory for the process lifetime.
///
/// Construct one per application and share it behind an `Arc`.
pub struct InMemorySongRepository {
    state: RwLock<LibraryState>,
    provider: Arc<dyn CatalogSearchProvider>,
    settings: LibrarySettings,
    events: Option<EventBus>,
}

impl InMemorySongRepository {
    pub fn new(provider: Arc<dyn CatalogSearchProvider>, settings: LibrarySettings) -> Self {
        Self {
            state: RwLock::new(LibraryState {
                catalog: CatalogCache::new(),
                recent: RecentlyPlayed::new(
                    NonZeroUsize::new(settings.recent_capacity).unwrap_or(NonZeroUsize::MIN),
                ),
                favorites: Favorites::new(),
            }),
            provider,
            settings,
            events: None,
        }
    }

    /// Publish repository changes on `event_bus` when `settings.emit_events` is set.
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.events = Some(event_bus);
        self
    }

    pub fn settings(&self) -> &LibrarySettings {
        &self.settings
    }

    fn emit(&self, event: CoreEvent) {
        if !self.settings.emit_events {
            return;
        }
        if let Some(bus) = &self.events {
            // No subscribers is fine
            let _ = bus.emit(event);
        }
    }

    fn emit_library(&self, event: LibraryEvent) {
        self.emit(CoreEvent::Library(event));
    }

    fn emit_search(&self, event: SearchEvent) {
        self.emit(CoreEvent::Search(event));
    }

    fn cancelled(&self, term: &str) -> LibraryError {
        info!(term, "Search cancelled before merge");
        self.emit_search(SearchEvent::Cancelled {
            term: term.to_string(),
        });
        LibraryError::Cancelled {
            term: term.to_string(),
        }
    }
}

#[async_trait]
impl SongRepository for InMemorySongRepository {
    async fn add_song(&self, song: Song) {
        let event = LibraryEvent::SongCached {
            song_id: song.id.to_string(),
            title: song.title.clone(),
        };

        self.state.write().await.catalog.insert(song);
        self.emit_library(event);
    }

    async fn add_songs(&self, songs: Vec<Song>) {
        if songs.is_empty() {
            return;
        }

        let count = self.state.write().await.catalog.insert_all(songs);
        self.emit_library(LibraryEvent::SongsMerged { count });
    }

    async fn get_song(&self, id: &SongId) -> Option<Song> {
        self.state.read().await.catalog.get(id).cloned()
    }

    async fn get_all_songs(&self) -> Vec<Song> {
        self.state.read().await.catalog.songs()
    }

    async fn remove_song(&self, id: &SongId) -> Option<Song> {
        let removed = self.state.write().await.catalog.remove(id);

        if removed.is_some() {
            debug!(song_id = %id, "Removed song from catalog cache");
            self.emit_library(LibraryEvent::SongRemoved {
                song_id: id.to_string(),
            });
        }

        removed
    }

    async fn add_to_recently_played(&self, song: Song) {
        let song_id = song.id.to_string();
        let len = self.state.write().await.recent.push(song);

        self.emit_library(LibraryEvent::RecentlyPlayedUpdated { song_id, len });
    }

    async fn recently_played_songs(&self) -> Vec<Song> {
        self.state.read().await.recent.songs()
    }

    async fn clear_recently_played(&self) {
        self.state.write().await.recent.clear();
        self.emit_library(LibraryEvent::RecentlyPlayedCleared);
    }

    async fn add_to_favorites(&self, song: Song) -> bool {
        let song_id = song.id.to_string();
        let added = self.state.write().await.favorites.add(song);

        if added {
            self.emit_library(LibraryEvent::FavoriteAdded { song_id });
        }

        added
    }

    async fn remove_from_favorites(&self, id: &SongId) -> bool {
        let removed = self.state.write().await.favorites.remove(id);

        if removed {
            self.emit_library(LibraryEvent::FavoriteRemoved {
                song_id: id.to_string(),
            });
        }

        removed
    }

    async fn toggle_favorite(&self, song: Song) -> bool {
        let song_id = song.id.to_string();
        let now_favorite = self.state.write().await.favorites.toggle(song);

        if now_favorite {
            self.emit_library(LibraryEvent::FavoriteAdded { song_id });
        } else {
            self.emit_library(LibraryEvent::FavoriteRemoved { song_id });
        }

        now_favorite
    }

    async fn is_favorite(&self, id: &SongId) -> bool {
        self.state.read().await.favorites.contains(id)
    }

    async fn favorite_songs(&self) -> Vec<Song> {
        self.state.read().await.favorites.songs()
    }

    async fn search_songs(&self, term: &str, limit: Option<u32>) -> Result<Vec<Song>> {
        // Dropping this future before the merge lock is taken also skips the merge.
        let never_cancelled = CancellationToken::new();
        self.search_songs_cancellable(term, limit, &never_cancelled)
            .await
    }

    #[instrument(skip(self, cancel), fields(provider = %self.provider.name()))]
    async fn search_songs_cancellable(
        &self,
        term: &str,
        limit: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Song>> {
        if cancel.is_cancelled() {
            return Err(self.cancelled(term));
        }

        let limit = limit.unwrap_or(self.settings.default_search_limit);
        self.emit_search(SearchEvent::Started {
            term: term.to_string(),
            limit,
        });

        // No lock is held while waiting on the provider.
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.provider.search(term, limit) => Some(result),
        };

        let songs = match outcome {
            None => return Err(self.cancelled(term)),
            Some(Err(e)) => {
                warn!(error = %e, "Catalog search failed");
                self.emit_search(SearchEvent::Failed {
                    term: term.to_string(),
                    message: e.to_string(),
                });
                return Err(LibraryError::CatalogUnavailable {
                    term: term.to_string(),
                    message: e.to_string(),
                });
            }
            Some(Ok(songs)) => songs,
        };

        let merged = {
            let mut state = self.state.write().await;
            // Cancellation may have landed while waiting for the lock.
            if cancel.is_cancelled() {
                None
            } else {
                Some(state.catalog.insert_all(songs.iter().cloned()))
            }
        };

        let Some(count) = merged else {
            return Err(self.cancelled(term));
        };

        info!(result_count = songs.len(), "Catalog search merged");
        if count > 0 {
            self.emit_library(LibraryEvent::SongsMerged { count });
        }
        self.emit_search(SearchEvent::Completed {
            term: term.to_string(),
            result_count: songs.len(),
        });

        Ok(songs)
    }

    async fn stats(&self) -> LibraryStats {
        let state = self.state.read().await;
        LibraryStats {
            cached_songs: state.catalog.len(),
            recently_played: state.recent.len(),
            favorites: state.favorites.len(),
            recent_capacity: state.recent.capacity().get(),
        }
    }
}

impl std::fmt::Debug for InMemorySongRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySongRepository")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use mockall::mock;

    mock! {
        CatalogProvider {}

        #[async_trait]
        impl CatalogSearchProvider for CatalogProvider {
            async fn search(&self, term: &str, limit: u32) -> BridgeResult<Vec<Song>>;
        }
    }

    fn song(id: &str, title: &str) -> Song {
        Song::new(id, title, "Adele", "25")
    }

    fn provider() -> MockCatalogProvider {
        MockCatalogProvider::new()
    }

    fn repository(provider: MockCatalogProvider) -> InMemorySongRepository {
        InMemorySongRepository::new(Arc::new(provider), LibrarySettings::default())
    }

    #[tokio::test]
    async fn test_add_and_get_song() {
        let repo = repository(provider());
        repo.add_song(song("A", "X")).await;

        assert_eq!(repo.get_song(&SongId::from("A")).await, Some(song("A", "X")));
        assert!(repo.get_song(&SongId::from("B")).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_song_does_not_cascade() {
        let repo = repository(provider());
        let hello = song("A", "Hello");

        repo.add_song(hello.clone()).await;
        repo.add_to_recently_played(hello.clone()).await;
        repo.add_to_favorites(hello.clone()).await;

        assert_eq!(repo.remove_song(&hello.id).await, Some(hello.clone()));
        assert!(repo.remove_song(&hello.id).await.is_none());

        assert!(repo.get_song(&hello.id).await.is_none());
        assert!(repo.is_favorite(&hello.id).await);
        assert_eq!(repo.recently_played_songs().await, vec![hello]);
    }

    #[tokio::test]
    async fn test_search_uses_default_limit() {
        let mut provider = provider();
        provider
            .expect_search()
            .times(1)
            .returning(|_, limit| {
                assert_eq!(limit, 20);
                Ok(Vec::new())
            });

        let repo = repository(provider);
        assert!(repo.search_songs("adele", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_maps_to_catalog_unavailable() {
        let mut provider = provider();
        provider
            .expect_search()
            .times(1)
            .returning(|_, _| Err(BridgeError::OperationFailed("offline".to_string())));

        let repo = repository(provider);
        let err = repo.search_songs("adele", Some(5)).await.unwrap_err();

        match err {
            LibraryError::CatalogUnavailable { term, message } => {
                assert_eq!(term, "adele");
                assert!(message.contains("offline"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pre_cancelled_search_skips_provider() {
        let mut provider = provider();
        provider.expect_search().times(0);

        let repo = repository(provider);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = repo
            .search_songs_cancellable("adele", Some(5), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(repo.stats().await.cached_songs, 0);
    }

    #[tokio::test]
    async fn test_cancel_while_waiting_for_merge_lock() {
        let entered = Arc::new(tokio::sync::Notify::new());
        let mut provider = provider();
        {
            let entered = Arc::clone(&entered);
            provider.expect_search().times(1).returning(move |_, _| {
                entered.notify_one();
                Ok(vec![song("A", "Hello"), song("B", "Skyfall")])
            });
        }

        let repo = Arc::new(repository(provider));
        let cancel = CancellationToken::new();

        let guard = repo.state.write().await;
        let search = tokio::spawn({
            let repo = Arc::clone(&repo);
            let cancel = cancel.clone();
            async move { repo.search_songs_cancellable("adele", None, &cancel).await }
        });

        // The provider has answered; the search is now parked on the lock.
        entered.notified().await;
        cancel.cancel();
        drop(guard);

        let result = search.await.unwrap();
        assert!(matches!(result, Err(LibraryError::Cancelled { .. })));
        assert!(repo.get_all_songs().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_alternate() {
        let repo = Arc::new(repository(provider()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.toggle_favorite(song("A", "Hello")).await })
            })
            .collect();

        let mut added = 0;
        for handle in handles {
            if handle.await.unwrap() {
                added += 1;
            }
        }

        // Every toggle observed the previous one, so adds and removes pair up.
        assert_eq!(added, 4);
        assert!(!repo.is_favorite(&SongId::from("A")).await);
    }

    #[tokio::test]
    async fn test_stats() {
        let settings = LibrarySettings::default().with_recent_capacity(3);
        let repo = InMemorySongRepository::new(Arc::new(provider()), settings);

        repo.add_songs(vec![song("1", "a"), song("2", "b")]).await;
        repo.add_to_recently_played(song("1", "a")).await;
        repo.add_to_favorites(song("2", "b")).await;

        assert_eq!(
            repo.stats().await,
            LibraryStats {
                cached_songs: 2,
                recently_played: 1,
                favorites: 1,
                recent_capacity: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_events_emitted_after_mutation() {
        let bus = EventBus::new(16);
        let mut events = bus.subscribe();
        let repo = repository(provider()).with_event_bus(bus);

        repo.add_to_favorites(song("A", "X")).await;
        repo.add_to_favorites(song("A", "X")).await;
        repo.remove_from_favorites(&SongId::from("A")).await;

        assert_eq!(
            events.recv().await.unwrap(),
            CoreEvent::Library(LibraryEvent::FavoriteAdded {
                song_id: "A".to_string()
            })
        );
        assert_eq!(
            events.recv().await.unwrap(),
            CoreEvent::Library(LibraryEvent::FavoriteRemoved {
                song_id: "A".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_events_disabled_by_settings() {
        let bus = EventBus::new(16);
        let mut events = bus.subscribe();
        let settings = LibrarySettings::default().with_events(false);
        let repo = InMemorySongRepository::new(Arc::new(provider()), settings).with_event_bus(bus);

        repo.add_song(song("A", "X")).await;

        assert!(events.try_recv().is_err());
    }
}
