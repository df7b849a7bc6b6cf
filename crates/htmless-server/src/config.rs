//! Server configuration.

use std::path::PathBuf;

/// Configuration for the file server.
///
/// ## Example
///
/// ```
/// use htmless_server::ServerConfig;
/// use std::path::PathBuf;
///
/// let config = ServerConfig::new()
///     .with_port(8080)
///     .with_root(PathBuf::from("./public"));
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
	/// Port to listen on.
	pub port: u16,
	/// Directory served as the site root.
	pub root: PathBuf,
	/// Certificate material for HTTPS; `None` serves plain HTTP.
	pub tls: Option<TlsConfig>,
}

/// Certificate material for HTTPS serving.
#[derive(Debug, Clone)]
pub struct TlsConfig {
	/// Certificate file, PEM format.
	pub cert: PathBuf,
	/// Private key file, PEM format. May be the same file as the
	/// certificate.
	pub key: PathBuf,
}

impl TlsConfig {
	/// Creates TLS material pointing at the given certificate and key files.
	pub fn new(cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
		Self {
			cert: cert.into(),
			key: key.into(),
		}
	}
}

impl ServerConfig {
	/// Creates a configuration with the defaults: port 3000, current
	/// directory as root, plain HTTP.
	pub fn new() -> Self {
		Self {
			port: 3000,
			root: PathBuf::from("."),
			tls: None,
		}
	}

	/// Sets the listening port.
	pub fn with_port(mut self, port: u16) -> Self {
		self.port = port;
		self
	}

	/// Sets the served root directory.
	pub fn with_root(mut self, root: PathBuf) -> Self {
		self.root = root;
		self
	}

	/// Enables HTTPS with the given certificate material.
	pub fn with_tls(mut self, tls: TlsConfig) -> Self {
		self.tls = Some(tls);
		self
	}
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_defaults() {
		let config = ServerConfig::new();
		assert_eq!(config.port, 3000);
		assert_eq!(config.root, PathBuf::from("."));
		assert!(config.tls.is_none());
	}

	#[test]
	fn test_config_builder() {
		let config = ServerConfig::new()
			.with_port(8080)
			.with_root(PathBuf::from("/srv/files"));
		assert_eq!(config.port, 8080);
		assert_eq!(config.root, PathBuf::from("/srv/files"));
	}

	#[test]
	fn test_config_with_tls() {
		let config = ServerConfig::new()
			.with_tls(TlsConfig::new("./ssl.cert.pem", "./ssl.key.pem"));
		let tls = config.tls.unwrap();
		assert_eq!(tls.cert, PathBuf::from("./ssl.cert.pem"));
		assert_eq!(tls.key, PathBuf::from("./ssl.key.pem"));
	}
}
