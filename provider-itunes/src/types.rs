//! iTunes Search API response types
//!
//! See: https://performance-partners.apple.com/search-api

use serde::Deserialize;

/// Top-level `/search` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: u32,

    #[serde(default)]
    pub results: Vec<ItunesTrack>,
}

/// A single result record.
///
/// Every field is optional because `/search` mixes kinds (tracks, music
/// videos, collections) and omits fields freely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesTrack {
    /// `"track"`, `"collection"`, ...
    pub wrapper_type: Option<String>,

    /// `"song"`, `"music-video"`, ...
    pub kind: Option<String>,

    pub track_id: Option<u64>,

    pub track_name: Option<String>,

    pub artist_name: Option<String>,

    pub collection_name: Option<String>,

    pub track_time_millis: Option<u64>,

    /// 100px artwork, e.g. `.../source/100x100bb.jpg`
    pub artwork_url100: Option<String>,
}
