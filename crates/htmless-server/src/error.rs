//! Error types for htmless-server.

use thiserror::Error;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
	/// Filesystem or socket failure.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Response construction failure.
	#[error("HTTP error: {0}")]
	Http(#[from] http::Error),

	/// Certificate material rejected while assembling the TLS configuration.
	#[error("TLS error: {0}")]
	Tls(#[from] tokio_rustls::rustls::Error),

	/// Page rendering failure.
	#[error("render error: {0}")]
	Render(#[from] htmless_pages::PagesError),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
