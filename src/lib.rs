//! Plexletter - newsletter composer for a personal Plex server
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod error;
pub mod mail;
pub mod metadata;
pub mod newsletter;
pub mod server;

pub use error::{Error, Result};
