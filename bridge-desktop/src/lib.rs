//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`
//! - `AuthorizationProvider` with a fixed status (public catalogs need no consent)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, StaticAuthorizationProvider};
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new());
//! let authorization = Arc::new(StaticAuthorizationProvider::authorized());
//! ```

mod authorization;
mod http;

pub use authorization::StaticAuthorizationProvider;
pub use http::ReqwestHttpClient;
