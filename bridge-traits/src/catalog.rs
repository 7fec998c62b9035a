//! Catalog Search Abstraction
//!
//! Defines the song record handed out by remote music catalogs and the
//! provider contract used to search them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::Result;

/// Opaque catalog identifier for a song.
///
/// Two songs with the same `SongId` are the same catalog item, regardless of
/// any other field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub String);

impl SongId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SongId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reference to remotely hosted artwork.
///
/// Catalog artwork URLs are templates with `{w}` and `{h}` placeholders that
/// the host fills with the size it wants to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRef {
    pub url_template: String,
    /// Largest width the catalog offers, if known
    pub width: Option<u32>,
    /// Largest height the catalog offers, if known
    pub height: Option<u32>,
}

impl ArtworkRef {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            width: None,
            height: None,
        }
    }

    /// Resolve the template for the requested size.
    ///
    /// The requested size is capped at the catalog maximum when one is known.
    pub fn url(&self, width: u32, height: u32) -> String {
        let width = self.width.map_or(width, |max| width.min(max));
        let height = self.height.map_or(height, |max| height.min(max));

        self.url_template
            .replace("{w}", &width.to_string())
            .replace("{h}", &height.to_string())
    }
}

/// A song record as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist_name: String,
    pub album_title: String,
    pub duration: Option<Duration>,
    pub artwork: Option<ArtworkRef>,
}

impl Song {
    pub fn new(
        id: impl Into<SongId>,
        title: impl Into<String>,
        artist_name: impl Into<String>,
        album_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist_name: artist_name.into(),
            album_title: album_title.into(),
            duration: None,
            artwork: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_artwork(mut self, artwork: ArtworkRef) -> Self {
        self.artwork = Some(artwork);
        self
    }

    /// Duration in whole seconds, if the catalog reported one
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration.map(|d| d.as_secs())
    }
}

/// Remote catalog search capability.
///
/// Implementations translate a free-text term into catalog song records.
/// The term and limit are forwarded exactly as given; validating or trimming
/// the term is the caller's concern. Any failure (network, authorization,
/// provider-side) is reported as an error and no partial results are returned.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::catalog::CatalogSearchProvider;
///
/// async fn first_hit(provider: &dyn CatalogSearchProvider) -> Option<String> {
///     let songs = provider.search("adele", 1).await.ok()?;
///     songs.into_iter().next().map(|song| song.title)
/// }
/// ```
#[async_trait]
pub trait CatalogSearchProvider: Send + Sync {
    /// Search the catalog for songs matching `term`, returning at most `limit` results.
    async fn search(&self, term: &str, limit: u32) -> Result<Vec<Song>>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "catalog"
    }
}
