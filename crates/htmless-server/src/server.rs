//! The accept loop.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::handler::handle_request;
use crate::tls::load_acceptor;

/// Binds the configured port and serves requests until the process exits.
///
/// With [`ServerConfig::tls`] set, certificate material is loaded up front
/// and every accepted connection goes through a TLS handshake before being
/// handed to hyper; otherwise connections are served as plain HTTP.
///
/// # Errors
///
/// Returns an error if the port cannot be bound, the TLS material cannot be
/// loaded, or accepting a connection fails. Per-connection failures after
/// accept (handshake, protocol errors) are logged and do not stop the loop.
pub async fn run(config: ServerConfig) -> Result<()> {
	let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
	let listener = TcpListener::bind(addr).await?;

	let acceptor = match &config.tls {
		Some(tls) => Some(load_acceptor(tls)?),
		None => None,
	};
	let scheme = if acceptor.is_some() { "https" } else { "http" };
	tracing::info!(
		port = config.port,
		root = %config.root.display(),
		"listening on {}://localhost:{}",
		scheme,
		config.port
	);

	let config = Arc::new(config);
	loop {
		let (stream, remote) = listener.accept().await?;
		let config = Arc::clone(&config);
		let acceptor = acceptor.clone();

		tokio::task::spawn(async move {
			let service = service_fn(move |req| {
				let config = Arc::clone(&config);
				async move { handle_request(config.as_ref(), req).await }
			});

			let served = match acceptor {
				Some(acceptor) => match acceptor.accept(stream).await {
					Ok(stream) => {
						http1::Builder::new()
							.serve_connection(TokioIo::new(stream), service)
							.await
					}
					Err(err) => {
						tracing::debug!(%remote, error = %err, "TLS handshake failed");
						return;
					}
				},
				None => {
					http1::Builder::new()
						.serve_connection(TokioIo::new(stream), service)
						.await
				}
			};

			if let Err(err) = served {
				tracing::debug!(%remote, error = %err, "connection ended with error");
			}
		});
	}
}
