//! iTunes Search API connector
//!
//! Implements the `CatalogSearchProvider` trait for the public iTunes Search API.

use async_trait::async_trait;
use bridge_traits::catalog::{ArtworkRef, CatalogSearchProvider, Song};
use bridge_traits::http::{HttpClient, HttpRequest};
use core_runtime::config::CatalogApiConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{ItunesError, Result};
use crate::types::{ItunesTrack, SearchResponse};

/// Maximum results per request (iTunes Search API limit)
const MAX_LIMIT: u32 = 200;

/// Size token used by iTunes artwork URLs
const ARTWORK_SIZE_TOKEN: &str = "100x100";

/// iTunes Search API connector
///
/// # Example
///
/// ```ignore
/// use provider_itunes::ItunesCatalogProvider;
/// use bridge_traits::catalog::CatalogSearchProvider;
///
/// let provider = ItunesCatalogProvider::new(http_client, CatalogApiConfig::default());
/// let songs = provider.search("adele", 5).await?;
/// ```
pub struct ItunesCatalogProvider {
    http_client: Arc<dyn HttpClient>,
    config: CatalogApiConfig,
}

impl ItunesCatalogProvider {
    pub fn new(http_client: Arc<dyn HttpClient>, config: CatalogApiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn search_url(&self, term: &str, limit: u32) -> String {
        format!(
            "{}/search?term={}&media={}&entity=song&limit={}&country={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(term),
            urlencoding::encode(&self.config.media),
            limit.min(MAX_LIMIT),
            urlencoding::encode(&self.config.country),
        )
    }

    /// Convert an iTunes record into a catalog `Song`.
    ///
    /// Returns `None` for records that are not song tracks or lack an id or title.
    fn convert_track(track: ItunesTrack) -> Option<Song> {
        if matches!(track.wrapper_type.as_deref(), Some(wrapper) if wrapper != "track") {
            return None;
        }
        if matches!(track.kind.as_deref(), Some(kind) if kind != "song") {
            return None;
        }

        let id = track.track_id?;
        let title = track.track_name?;

        let mut song = Song::new(
            id.to_string(),
            title,
            track.artist_name.unwrap_or_default(),
            track.collection_name.unwrap_or_default(),
        );

        if let Some(millis) = track.track_time_millis {
            song = song.with_duration(Duration::from_millis(millis));
        }

        if let Some(url) = track.artwork_url100 {
            song = song.with_artwork(ArtworkRef::new(
                url.replacen(ARTWORK_SIZE_TOKEN, "{w}x{h}", 1),
            ));
        }

        Some(song)
    }

    #[instrument(skip(self), fields(provider = "itunes"))]
    async fn search_tracks(&self, term: &str, limit: u32) -> Result<Vec<Song>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let request = HttpRequest::get(self.search_url(term, limit))
            .accept_json()
            .timeout(Duration::from_secs(self.config.request_timeout_secs));

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "Catalog search rejected");
            return Err(ItunesError::ApiError {
                status_code: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let parsed: SearchResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ItunesError::ParseError(e.to_string()))?;

        let reported = parsed.result_count;
        let songs: Vec<Song> = parsed
            .results
            .into_iter()
            .filter_map(Self::convert_track)
            .take(limit as usize)
            .collect();

        if songs.len() as u32 != reported {
            debug!(reported, kept = songs.len(), "Skipped non-song records");
        }

        info!(result_count = songs.len(), "Catalog search succeeded");
        Ok(songs)
    }
}

#[async_trait]
impl CatalogSearchProvider for ItunesCatalogProvider {
    async fn search(&self, term: &str, limit: u32) -> bridge_traits::error::Result<Vec<Song>> {
        self.search_tracks(term, limit).await.map_err(Into::into)
    }

    fn name(&self) -> &str {
        "itunes"
    }
}
