//! htmless file server binary.
//!
//! Serves a directory over HTTP; directories render as streamed
//! htmless-pages listing documents, files stream with guessed content types.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use htmless_server::{ServerConfig, TlsConfig};

#[derive(Parser)]
#[command(name = "htmless-server")]
#[command(about = "Static file server with streaming directory listings")]
#[command(version)]
struct Cli {
	/// Port to listen on
	#[arg(short, long, default_value_t = 3000)]
	port: u16,

	/// Directory to serve (defaults to the current directory)
	#[arg(short, long, default_value = ".")]
	root: PathBuf,

	/// Serve HTTPS instead of HTTP
	#[arg(long)]
	ssl: bool,

	/// Certificate file in PEM format
	#[arg(long = "ssl-cert", default_value = "./ssl.cert.pem")]
	ssl_cert: PathBuf,

	/// Private key file in PEM format; defaults to the certificate file
	#[arg(long = "ssl-key")]
	ssl_key: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt::init();

	let cli = Cli::parse();
	let mut config = ServerConfig::new().with_port(cli.port).with_root(cli.root);
	if cli.ssl {
		let key = cli.ssl_key.unwrap_or_else(|| cli.ssl_cert.clone());
		config = config.with_tls(TlsConfig::new(cli.ssl_cert, key));
	}

	if let Err(err) = htmless_server::run(config).await {
		tracing::error!(error = %err, "server failed");
		process::exit(1);
	}
}
