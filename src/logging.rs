//! Tracing setup.

use crate::conf::Settings;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins over the `log_filter` setting. Calling this twice is
/// harmless: the second call keeps the first subscriber.
pub fn init(settings: &Settings) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
	let _ = fmt()
		.with_env_filter(filter)
		.with_target(settings.debug)
		.try_init();
}
