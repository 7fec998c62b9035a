//! Search the iTunes catalog and exercise the library lists.
//!
//! ```text
//! cargo run -p core-service --example search_demo -- "daft punk"
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use bridge_desktop::StaticAuthorizationProvider;
use bridge_traits::logging::LogLevel;
use core_runtime::config::CoreConfig;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::CoreService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Info),
    )
    .context("failed to initialize logging")?;

    let term = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "adele".to_string());

    let config = CoreConfig::builder()
        .recent_capacity(5)
        .authorization_provider(Arc::new(StaticAuthorizationProvider::authorized()))
        .build()
        .context("invalid configuration")?;
    let core = CoreService::bootstrap(config)?;
    info!(status = %core.authorization_status().await?, "Catalog access");

    let songs = core
        .search_with_limit(&term, Some(10))
        .await
        .with_context(|| format!("search for {term:?} failed"))?;

    info!(count = songs.len(), term = %term, "Search finished");
    for song in &songs {
        println!(
            "{:>12}  {} - {} ({})",
            song.id, song.artist_name, song.title, song.album_title
        );
    }

    for song in songs.iter().take(3) {
        core.record_playback(song.clone()).await;
    }
    if let Some(first) = songs.first() {
        core.toggle_favorite(first.clone()).await;
    }

    let stats = core.library().stats().await;
    println!(
        "cached: {}, recently played: {}, favorites: {}",
        stats.cached_songs, stats.recently_played, stats.favorites
    );

    Ok(())
}
