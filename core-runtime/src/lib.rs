//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the music catalog core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on.
//! It establishes the configuration contract, logging conventions and event
//! broadcasting used throughout the workspace.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{CatalogApiConfig, CoreConfig, CoreConfigBuilder, LibrarySettings};
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, EventStream, LibraryEvent, SearchEvent};
