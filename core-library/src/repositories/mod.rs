//! # Repository Pattern Implementation
//!
//! ## Architecture
//!
//! - [`SongRepository`] defines the query and mutation surface
//! - [`InMemorySongRepository`] implements it over three containers guarded
//!   by a single lock
//! - Each container enforces identifier uniqueness on its own; there is no
//!   shared index, and removing a song from the catalog does not touch the
//!   recently played or favorites lists
//!
//! ## Containers
//!
//! - [`CatalogCache`] - Songs keyed by id, last write wins
//! - [`RecentlyPlayed`] - Most-recent-first, distinct ids, bounded
//! - [`Favorites`] - Insertion-ordered, distinct ids

use crate::error::Result;
use crate::models::{LibraryStats, Song, SongId};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub mod catalog;
pub mod favorites;
pub mod memory;
pub mod recent;

pub use catalog::CatalogCache;
pub use favorites::Favorites;
pub use memory::InMemorySongRepository;
pub use recent::RecentlyPlayed;

/// Song repository interface.
///
/// Every operation except the searches is total: lookups return `None`,
/// `false` or an empty list rather than failing.
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Insert or overwrite the cached song with the same id.
    async fn add_song(&self, song: Song);

    /// Apply [`add_song`](Self::add_song) to each song in order.
    async fn add_songs(&self, songs: Vec<Song>);

    async fn get_song(&self, id: &SongId) -> Option<Song>;

    /// All cached songs. Order is unspecified.
    async fn get_all_songs(&self) -> Vec<Song>;

    /// Remove a song from the catalog cache and return it.
    ///
    /// The recently played and favorites lists are left untouched.
    async fn remove_song(&self, id: &SongId) -> Option<Song>;

    /// Move `song` to the front of the recently played list.
    async fn add_to_recently_played(&self, song: Song);

    /// Recently played songs, most recent first.
    async fn recently_played_songs(&self) -> Vec<Song>;

    async fn clear_recently_played(&self);

    /// Add `song` to favorites unless its id is already present.
    ///
    /// # Returns
    /// - `true` if the song was added
    /// - `false` if it was already a favorite
    async fn add_to_favorites(&self, song: Song) -> bool;

    /// # Returns
    /// - `true` if a favorite was removed
    /// - `false` if `id` was not a favorite
    async fn remove_from_favorites(&self, id: &SongId) -> bool;

    /// Add `song` to favorites, or remove it if already present, under one
    /// lock acquisition. Returns `true` if it is a favorite afterwards.
    async fn toggle_favorite(&self, song: Song) -> bool;

    async fn is_favorite(&self, id: &SongId) -> bool;

    /// Favorites in insertion order.
    async fn favorite_songs(&self) -> Vec<Song>;

    /// Search the catalog and merge the results into the cache.
    ///
    /// `limit` defaults to the configured search limit. The term and limit
    /// are passed to the provider unmodified.
    ///
    /// # Errors
    /// Returns [`LibraryError::CatalogUnavailable`](crate::LibraryError::CatalogUnavailable)
    /// if the provider fails. The cache is unchanged in that case.
    async fn search_songs(&self, term: &str, limit: Option<u32>) -> Result<Vec<Song>>;

    /// [`search_songs`](Self::search_songs) with cooperative cancellation.
    ///
    /// # Errors
    /// Returns [`LibraryError::Cancelled`](crate::LibraryError::Cancelled) if
    /// `cancel` fires before the results are merged. Nothing is merged.
    async fn search_songs_cancellable(
        &self,
        term: &str,
        limit: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Song>>;

    async fn stats(&self) -> LibraryStats;
}
