use crate::apps::auth::ROLE_USER;
use crate::apps::{auth, todos};
use crate::di::Container;
use crate::middleware::AccessTable;
use crate::staticfiles::{SERVICE_WORKER_PATH, STATIC_PREFIX, StaticFiles};
use crate::urls::{Router, view};
use std::sync::Arc;

pub const HOME: &str = "home";
pub const STATIC: &str = "static";
pub const SERVICE_WORKER: &str = "service_worker";

/// Every route of the suite.
pub fn routes(container: &Arc<Container>) -> Router {
	let router = Router::new()
		.get("/", HOME, view(container, todos::views::home))
		.get(SERVICE_WORKER_PATH, SERVICE_WORKER, StaticFiles)
		.mount(STATIC_PREFIX, STATIC, StaticFiles);
	let router = auth::urls::routes(router, container);
	todos::urls::routes(router, container)
}

/// Routes that need a logged-in `ROLE_USER`: the todo manager and the
/// account pages.
pub fn access_table() -> AccessTable {
	[
		todos::urls::INDEX,
		todos::urls::CREATE,
		todos::urls::EDIT,
		todos::urls::DELETE,
		auth::urls::PASSWORD,
		auth::urls::PASSWORD_SUBMIT,
	]
	.into_iter()
	.fold(AccessTable::new(), |table, route| table.require(route, ROLE_USER))
}
