use crate::config::urls::{access_table, routes};
use crate::di::Container;
use crate::http::{Handler, MiddlewareChain};
use crate::middleware::{AuthorizationMiddleware, LoggingMiddleware};
use std::sync::Arc;

/// The root handler: logging, then authorization, then the router.
pub fn application(container: Arc<Container>) -> Arc<dyn Handler> {
	let router = Arc::new(routes(&container));
	Arc::new(
		MiddlewareChain::new(router.clone())
			.with_middleware(Arc::new(LoggingMiddleware::new()))
			.with_middleware(Arc::new(AuthorizationMiddleware::new(
				router,
				access_table(),
				container,
			))),
	)
}
