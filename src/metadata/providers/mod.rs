//! Concrete metadata provider implementations.
//!
//! Each submodule wraps a single external API and implements one of the
//! provider traits from [`super::provider`].

pub mod omdb;
pub mod tmdb;

pub use omdb::OmdbProvider;
pub use tmdb::TmdbProvider;
