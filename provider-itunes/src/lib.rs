//! # iTunes Catalog Provider
//!
//! Implements `CatalogSearchProvider` over the public iTunes Search API.
//!
//! ## Overview
//!
//! This module provides:
//! - Song search by free-text term (`/search?entity=song`)
//! - Mapping of iTunes track records into catalog `Song` values
//! - Artwork URL templating (`{w}x{h}`) for host-sized rendering
//!
//! Requests go through the host `HttpClient`, so transport retries and TLS
//! are handled by the bridge implementation.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::ItunesCatalogProvider;
pub use error::{ItunesError, Result};
