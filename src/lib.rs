//! # Jotter
//!
//! A small note-taking web server with session-based sign-in, usable both as a
//! standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use jotter::config::ServerConfig;
//! use jotter::server::{AppState, ImageBank, create_router};
//! use jotter::store::{SqliteSessionStore, SqliteStore, Store};
//!
//! let config = ServerConfig::default();
//! let store = Arc::new(SqliteStore::new(config.db_path()?)?);
//! store.initialize()?;
//!
//! let state = Arc::new(AppState {
//!     store: store.clone(),
//!     images: ImageBank::load(&config.image_dir())?,
//!     retention: config.retention,
//!     static_dir: config.static_dir.clone(),
//! });
//! let router = create_router(state, SqliteSessionStore::new(store), &config.session)?;
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod notes;
pub mod server;
pub mod store;
pub mod types;
