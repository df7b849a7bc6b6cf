//! TLS acceptor construction from PEM certificate material.

use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;

use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls;

use crate::config::TlsConfig;
use crate::error::Result;

/// Builds a TLS acceptor from the configured certificate and key files.
///
/// Both files are PEM; the key may live alongside the certificate in one
/// file, so the two paths are allowed to be equal.
///
/// # Errors
///
/// Returns an error if either file is unreadable, the certificate file
/// holds no certificates, no private key is found, or rustls rejects the
/// material when the server configuration is assembled.
pub fn load_acceptor(tls: &TlsConfig) -> Result<TlsAcceptor> {
	tracing::info!(
		cert = %tls.cert.display(),
		key = %tls.key.display(),
		"loading TLS certificate material"
	);

	let mut cert_reader = BufReader::new(File::open(&tls.cert)?);
	let certs = rustls_pemfile::certs(&mut cert_reader).collect::<io::Result<Vec<_>>>()?;
	if certs.is_empty() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidData,
			format!("no certificates found in {}", tls.cert.display()),
		)
		.into());
	}

	let mut key_reader = BufReader::new(File::open(&tls.key)?);
	let key = rustls_pemfile::private_key(&mut key_reader)?.ok_or_else(|| {
		io::Error::new(
			io::ErrorKind::InvalidData,
			format!("no private key found in {}", tls.key.display()),
		)
	})?;

	let config = rustls::ServerConfig::builder()
		.with_no_client_auth()
		.with_single_cert(certs, key)?;
	Ok(TlsAcceptor::from(Arc::new(config)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_missing_cert_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let absent = dir.path().join("absent.pem");
		let tls = TlsConfig::new(&absent, &absent);
		assert!(load_acceptor(&tls).is_err());
	}

	#[test]
	fn test_cert_file_without_certificates_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let cert = dir.path().join("empty.pem");
		fs::write(&cert, "not pem content\n").unwrap();
		let tls = TlsConfig::new(&cert, &cert);

		let err = load_acceptor(&tls).err().unwrap();
		assert!(err.to_string().contains("no certificates found"));
	}

	#[test]
	fn test_cert_without_private_key_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let cert = dir.path().join("cert-only.pem");
		// a syntactically valid certificate section with no key section
		fs::write(
			&cert,
			"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n",
		)
		.unwrap();
		let tls = TlsConfig::new(&cert, &cert);

		let err = load_acceptor(&tls).err().unwrap();
		assert!(err.to_string().contains("no private key found"));
	}
}
