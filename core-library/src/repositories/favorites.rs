//! Favorites list

use crate::models::{Song, SongId};

/// Insertion-ordered favorites with at most one entry per song id.
#[derive(Debug, Default, Clone)]
pub struct Favorites {
    songs: Vec<Song>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `song` unless its id is already present. Returns whether it was added.
    pub fn add(&mut self, song: Song) -> bool {
        if self.contains(&song.id) {
            return false;
        }
        self.songs.push(song);
        true
    }

    /// Remove every entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &SongId) -> bool {
        let before = self.songs.len();
        self.songs.retain(|song| &song.id != id);
        self.songs.len() != before
    }

    /// Remove `song` if present, otherwise add it. Returns whether it is a
    /// favorite afterwards.
    pub fn toggle(&mut self, song: Song) -> bool {
        if self.remove(&song.id) {
            false
        } else {
            self.songs.push(song);
            true
        }
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.iter().any(|song| &song.id == id)
    }

    pub fn songs(&self) -> Vec<Song> {
        self.songs.clone()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
