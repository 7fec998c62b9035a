//! # Host Bridge Traits
//!
//! Capability traits the catalog core needs from its host.
//!
//! ## Overview
//!
//! This crate defines the contract between the core crates and
//! platform-specific implementations. Each trait represents a capability that
//! the core requires but that is implemented differently per platform
//! (iOS MusicKit, desktop HTTP, test doubles).
//!
//! ## Traits
//!
//! ### Catalog
//! - [`CatalogSearchProvider`](catalog::CatalogSearchProvider) - Remote song search
//! - [`AuthorizationProvider`](authorization::AuthorizationProvider) - Catalog access consent
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP used by catalog providers
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! convert platform errors into it and keep the message actionable.
//!
//! ## Thread Safety
//!
//! Every trait requires `Send + Sync` so handles can be shared across async
//! tasks behind an `Arc`.

pub mod authorization;
pub mod catalog;
pub mod error;
pub mod http;
pub mod logging;

pub use error::BridgeError;

// Re-export commonly used types
pub use authorization::{AuthorizationProvider, AuthorizationStatus};
pub use catalog::{ArtworkRef, CatalogSearchProvider, Song, SongId};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
