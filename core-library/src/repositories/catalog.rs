//! Catalog cache keyed by song identity

use crate::models::{Song, SongId};
use std::collections::HashMap;

/// Unordered map from song id to the last song written under that id.
#[derive(Debug, Default, Clone)]
pub struct CatalogCache {
    songs: HashMap<SongId, Song>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the previous value for the id.
    pub fn insert(&mut self, song: Song) -> Option<Song> {
        self.songs.insert(song.id.clone(), song)
    }

    /// Insert in iteration order; later songs overwrite earlier ones sharing an id.
    pub fn insert_all<I>(&mut self, songs: I) -> usize
    where
        I: IntoIterator<Item = Song>,
    {
        let mut written = 0;
        for song in songs {
            self.insert(song);
            written += 1;
        }
        written
    }

    pub fn get(&self, id: &SongId) -> Option<&Song> {
        self.songs.get(id)
    }

    pub fn remove(&mut self, id: &SongId) -> Option<Song> {
        self.songs.remove(id)
    }

    /// All cached songs, in no particular order.
    pub fn songs(&self) -> Vec<Song> {
        self.songs.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
