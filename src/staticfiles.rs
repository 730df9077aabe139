//! Browser assets embedded in the binary.
//!
//! Served under `/assets/`; the service worker is also served at `/sw.js`
//! so its scope covers the whole site.

use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use async_trait::async_trait;
use hyper::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderValue};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const STATIC_PREFIX: &str = "/assets/";
pub const SERVICE_WORKER_PATH: &str = "/sw.js";

/// Notification icon shown by the service worker.
pub const WARNING_ICON: &str = "/assets/images/warning.png";
/// Notification badge shown by the service worker.
pub const FAVICON: &str = "/assets/images/favicon.png";

struct Asset {
	content_type: &'static str,
	body: &'static [u8],
}

static ASSETS: Lazy<HashMap<&'static str, Asset>> = Lazy::new(|| {
	HashMap::from([
		(
			"/assets/js/todo_edit.js",
			Asset {
				content_type: "text/javascript; charset=utf-8",
				body: include_bytes!("../assets/js/todo_edit.js"),
			},
		),
		(
			"/assets/js/sw.js",
			Asset {
				content_type: "text/javascript; charset=utf-8",
				body: include_bytes!("../assets/js/sw.js"),
			},
		),
		(
			"/assets/css/app.css",
			Asset {
				content_type: "text/css; charset=utf-8",
				body: include_bytes!("../assets/css/app.css"),
			},
		),
		(
			WARNING_ICON,
			Asset {
				content_type: "image/png",
				body: include_bytes!("../assets/images/warning.png"),
			},
		),
		(
			FAVICON,
			Asset {
				content_type: "image/png",
				body: include_bytes!("../assets/images/favicon.png"),
			},
		),
	])
});

/// Serves the embedded assets by request path.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticFiles;

impl StaticFiles {
	fn lookup(path: &str) -> Option<&'static Asset> {
		let path = if path == SERVICE_WORKER_PATH {
			"/assets/js/sw.js"
		} else {
			path
		};
		ASSETS.get(path)
	}
}

#[async_trait]
impl Handler for StaticFiles {
	async fn handle(&self, request: Request) -> Result<Response> {
		let asset =
			Self::lookup(request.path()).ok_or_else(|| Error::NotFound(request.path().to_string()))?;
		// the worker script must revalidate so updates reach browsers
		let cache_control = if request.path() == SERVICE_WORKER_PATH {
			"no-cache"
		} else {
			"public, max-age=3600"
		};
		Ok(Response::ok()
			.with_typed_header(CONTENT_TYPE, HeaderValue::from_static(asset.content_type))
			.with_typed_header(CACHE_CONTROL, HeaderValue::from_static(cache_control))
			.with_body(asset.body))
	}
}
