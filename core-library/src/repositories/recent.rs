//! Bounded recently played list

use crate::models::{Song, SongId};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Most-recent-first list of distinct songs, capped at `capacity`.
///
/// Backed by an LRU cache keyed by song id: replaying a song promotes it and
/// the least recently played entry is evicted once the list is full.
#[derive(Debug)]
pub struct RecentlyPlayed {
    songs: LruCache<SongId, Song>,
}

impl RecentlyPlayed {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            songs: LruCache::new(capacity),
        }
    }

    /// Move `song` to the front, replacing any earlier entry with the same id
    /// and evicting the oldest entry past capacity. Returns the new length.
    pub fn push(&mut self, song: Song) -> usize {
        self.songs.put(song.id.clone(), song);
        self.songs.len()
    }

    pub fn songs(&self) -> Vec<Song> {
        self.songs.iter().map(|(_, song)| song.clone()).collect()
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.contains(id)
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.songs.cap()
    }
}
