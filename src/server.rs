//! HTTP/1.1 server on hyper and tokio.

use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// HTTP server driving a single root handler
pub struct HttpServer {
	handler: Arc<dyn Handler>,
}

impl HttpServer {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Accept connections on `addr` until Ctrl-C.
	///
	/// Each connection is served on its own task; in-flight connections
	/// are not awaited on shutdown.
	pub async fn listen(self, addr: SocketAddr) -> Result<()> {
		let listener = TcpListener::bind(addr)
			.await
			.map_err(|e| Error::Internal(format!("failed to bind {addr}: {e}")))?;
		info!(%addr, "server listening");

		let shutdown = tokio::signal::ctrl_c();
		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				accepted = listener.accept() => {
					let (stream, remote) = match accepted {
						Ok(accepted) => accepted,
						Err(err) => {
							warn!(error = %err, "failed to accept connection");
							continue;
						}
					};
					let handler = self.handler.clone();
					tokio::spawn(async move {
						if let Err(err) = Self::serve_connection(stream, remote, handler).await {
							debug!(%remote, error = %err, "connection closed with error");
						}
					});
				}
				_ = &mut shutdown => {
					info!("shutdown signal received");
					break;
				}
			}
		}
		Ok(())
	}

	async fn serve_connection(
		stream: TcpStream,
		remote: SocketAddr,
		handler: Arc<dyn Handler>,
	) -> std::result::Result<(), hyper::Error> {
		let io = TokioIo::new(stream);
		let service = service_fn(move |request: hyper::Request<Incoming>| {
			let handler = handler.clone();
			async move { Ok::<_, Infallible>(Self::serve_request(handler, request, remote).await) }
		});
		http1::Builder::new().serve_connection(io, service).await
	}

	async fn serve_request(
		handler: Arc<dyn Handler>,
		request: hyper::Request<Incoming>,
		remote: SocketAddr,
	) -> hyper::Response<Full<Bytes>> {
		let (parts, body) = request.into_parts();
		let body = match read_body(body, MAX_BODY_SIZE).await {
			Ok(body) => body,
			Err(err) => {
				debug!(%remote, error = %err, "unreadable request body");
				return Response::from_error(&err).into_hyper();
			}
		};
		let request = Request::from_parts(parts, body, Some(remote));
		dispatch(handler.as_ref(), request).await.into_hyper()
	}
}

/// Buffer `body`, failing with [`Error::PayloadTooLarge`] past `limit` bytes.
pub async fn read_body<B>(body: B, limit: usize) -> Result<Bytes>
where
	B: Body,
	B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
	match Limited::new(body, limit).collect().await {
		Ok(collected) => Ok(collected.to_bytes()),
		Err(err) if err.is::<LengthLimitError>() => Err(Error::PayloadTooLarge(format!(
			"request body exceeds {limit} bytes"
		))),
		Err(err) => Err(Error::Http(format!("failed to read request body: {err}"))),
	}
}

/// Run `request` through `handler`, converting a failure into its error
/// response.
pub async fn dispatch(handler: &dyn Handler, request: Request) -> Response {
	let method = request.method.clone();
	let path = request.path().to_string();
	match handler.handle(request).await {
		Ok(response) => response,
		Err(err) => {
			let response = Response::from_error(&err);
			if response.status.is_server_error() {
				error!(%method, %path, error = %err, "request failed");
			} else {
				debug!(%method, %path, error = %err, "request rejected");
			}
			response
		}
	}
}
