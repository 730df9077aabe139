use crate::exception::Result;
use crate::http::{Handler, Middleware, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Logs method, path, status and duration of every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Instant::now();
		let method = request.method.clone();
		let path = request.path().to_string();

		let result = next.handle(request).await;

		let elapsed_ms = start.elapsed().as_millis() as u64;
		match &result {
			Ok(response) => {
				info!(%method, %path, status = response.status.as_u16(), elapsed_ms, "request")
			}
			Err(err) => warn!(
				%method,
				%path,
				status = err.status_code().as_u16(),
				error = %err,
				elapsed_ms,
				"request failed"
			),
		}
		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::exception::Error;
	use crate::http::MiddlewareChain;
	use rstest::rstest;

	struct NotFound;

	#[async_trait]
	impl Handler for NotFound {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Err(Error::NotFound("todo 1".into()))
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_passes_result_through() {
		let chain = MiddlewareChain::new(Arc::new(NotFound))
			.with_middleware(Arc::new(LoggingMiddleware::new()));

		let result = chain
			.handle(Request::builder().uri("/manager/todo/edit").build().unwrap())
			.await;

		assert!(matches!(result, Err(Error::NotFound(_))));
	}
}
