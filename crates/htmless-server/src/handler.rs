//! The request handler.
//!
//! Resolves the request path under the configured root and answers with one
//! of three shapes: a 404 for misses, a streamed file body for regular files
//! (with a guessed content type), or a streamed directory-listing page. The
//! listing is produced by walking the builder session's tree once and
//! forwarding every serializer fragment into the body channel; the document
//! never exists as a single string on the server.

use std::io;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use futures::TryStreamExt;
use http::{Request, Response, StatusCode, header};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, StreamBody};
use hyper::body::Frame;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::io::ReaderStream;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::listing::build_listing_page;

/// Response body type: everything is streamed.
pub type ResponseBody = BoxBody<Bytes, io::Error>;

const FILE_CHUNK_SIZE: usize = 64 * 1024;

/// Handles one request against the configured root directory.
pub async fn handle_request<B>(
	config: &ServerConfig,
	req: Request<B>,
) -> Result<Response<ResponseBody>> {
	let uri_path = req.uri().path();
	tracing::debug!(path = uri_path, "request");

	let Some(path) = resolve_path(&config.root, uri_path) else {
		return not_found();
	};

	let metadata = match tokio::fs::metadata(&path).await {
		Ok(metadata) => metadata,
		Err(err) if err.kind() == io::ErrorKind::NotFound => return not_found(),
		Err(err) => return Err(err.into()),
	};

	if metadata.is_dir() {
		serve_directory(&path).await
	} else if metadata.is_file() {
		serve_file(&path, metadata.len()).await
	} else {
		// neither a file nor a directory (socket, fifo, ...)
		let response = Response::builder()
			.status(StatusCode::BAD_REQUEST)
			.body(empty_body())?;
		Ok(response)
	}
}

/// Maps the request path onto the served root. Returns `None` for paths that
/// escape the root (any `..` component) or fail to percent-decode.
fn resolve_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
	let decoded = urlencoding::decode(uri_path).ok()?;
	let relative = Path::new(decoded.trim_start_matches('/'));

	for component in relative.components() {
		match component {
			Component::Normal(_) | Component::CurDir => {}
			_ => return None,
		}
	}

	Some(root.join(relative))
}

/// Streams a directory listing page.
///
/// The builder session lives on a blocking worker: the tree is walked there
/// while the response body is already being polled, one channel send per
/// serializer fragment.
async fn serve_directory(path: &Path) -> Result<Response<ResponseBody>> {
	let mut dir = tokio::fs::read_dir(path).await?;
	let mut entries = Vec::new();
	while let Some(entry) = dir.next_entry().await? {
		entries.push(entry.file_name().to_string_lossy().into_owned());
	}
	entries.sort();

	let (tx, rx) = mpsc::unbounded_channel::<std::result::Result<Frame<Bytes>, io::Error>>();
	tokio::task::spawn_blocking(move || {
		let ssr = build_listing_page(&entries);
		let rendered = ssr.output_stream(&mut |chunk| {
			// a closed receiver means the client went away mid-stream
			let _ = tx.send(Ok(Frame::data(Bytes::copy_from_slice(chunk.as_bytes()))));
		});
		if let Err(err) = rendered {
			tracing::error!(error = %err, "listing page render failed");
		}
	});

	let body = StreamBody::new(UnboundedReceiverStream::new(rx)).boxed();
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html")
		.body(body)?;
	Ok(response)
}

/// Streams a regular file with its guessed content type.
async fn serve_file(path: &Path, length: u64) -> Result<Response<ResponseBody>> {
	let mime = mime_guess::from_path(path).first_or_octet_stream();
	let file = tokio::fs::File::open(path).await?;
	let stream = ReaderStream::with_capacity(file, FILE_CHUNK_SIZE);
	let body = StreamBody::new(stream.map_ok(Frame::data)).boxed();

	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, mime.as_ref())
		.header(header::CONTENT_LENGTH, length)
		.body(body)?;
	Ok(response)
}

fn not_found() -> Result<Response<ResponseBody>> {
	let response = Response::builder()
		.status(StatusCode::NOT_FOUND)
		.body(empty_body())?;
	Ok(response)
}

fn empty_body() -> ResponseBody {
	Empty::<Bytes>::new().map_err(|never| match never {}).boxed()
}
