//! # Library Management Module
//!
//! Owns the in-memory song repository layered over catalog search results.
//!
//! ## Overview
//!
//! This module manages three independent views over the same song-identity
//! space:
//! - A catalog cache keyed by song id (last write wins)
//! - A bounded, most-recent-first recently played list
//! - An insertion-ordered favorites list
//!
//! Remote search is delegated to a `CatalogSearchProvider`; successful
//! results are merged into the catalog cache. All mutations run under one
//! lock so the containers are always observed in a consistent state, and the
//! lock is never held across the provider round trip.
//!
//! ## Usage
//!
//! ```ignore
//! use core_library::{InMemorySongRepository, SongRepository};
//!
//! let repo = InMemorySongRepository::new(provider, LibrarySettings::default());
//! let songs = repo.search_songs("adele", Some(5)).await?;
//! repo.add_to_recently_played(songs[0].clone()).await;
//! ```

pub mod error;
pub mod models;
pub mod repositories;

pub use error::{LibraryError, Result};
pub use models::{LibraryStats, Song, SongId};
pub use repositories::{InMemorySongRepository, SongRepository};
