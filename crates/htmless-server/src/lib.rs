//! # htmless-server
//!
//! A small static file server whose directory listings are rendered with
//! [`htmless_pages`] and streamed fragment by fragment into the response
//! body, never buffered as one document.
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types
//! - [`handler`] - The request handler (files, directories, misses)
//! - [`listing`] - Directory-listing page assembly
//! - [`server`] - Accept loop
//! - [`tls`] - TLS acceptor construction for HTTPS serving

pub mod config;
pub mod error;
pub mod handler;
pub mod listing;
pub mod server;
pub mod tls;

pub use config::{ServerConfig, TlsConfig};
pub use error::{Result, ServerError};
pub use server::run;
