//! Project wiring: the route table, the access table and the middleware
//! stack around them.

pub mod middleware;
pub mod urls;

use crate::conf::Settings;
use crate::di::Container;
use crate::exception::Result;
use crate::server::HttpServer;
use crate::{db, logging};
use tracing::info;

/// Connect the database, apply migrations and serve until Ctrl-C.
pub async fn serve(settings: Settings) -> Result<()> {
	logging::init(&settings);
	let pool = db::connect(&settings.database_url).await?;
	db::migrate(&pool).await?;
	info!("migrations applied");

	let bind = settings.bind;
	let container = Container::new(settings, pool)?.into_shared();
	HttpServer::new(middleware::application(container))
		.listen(bind)
		.await
}
