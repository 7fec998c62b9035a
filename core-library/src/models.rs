//! Library data models

use serde::{Deserialize, Serialize};

pub use bridge_traits::catalog::{ArtworkRef, Song, SongId};

/// Point-in-time sizes of the repository containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryStats {
    pub cached_songs: usize,
    pub recently_played: usize,
    pub favorites: usize,
    pub recent_capacity: usize,
}
