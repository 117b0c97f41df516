//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter without
//! module paths. `RUST_LOG` wins when set; otherwise the configured level is
//! used.
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! STOREFRONT__LOG_LEVEL=warn cargo run
//! ```
//!
//! At `info` a checkout reads roughly like this:
//!
//! ```text
//! INFO checkout:place_order: Batch ok entity_type="Product" count=2
//! INFO checkout:place_order: Order placed order_id=order_1 user_id=user_1 total=210 status=Pending lines=2
//! INFO checkout:place_order: Created entity_type="Order" id=order_1 size=1
//! ```
//!
//! `debug` adds the request payloads.
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
