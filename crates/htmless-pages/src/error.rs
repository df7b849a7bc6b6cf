//! Error types for htmless-pages.

use thiserror::Error;

/// Error type for builder operations.
#[derive(Debug, Error)]
pub enum PagesError {
	/// `output_stream` was called on a session that never created an element.
	#[error("no root element: create() was never called on this session")]
	NoRoot,
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, PagesError>;
