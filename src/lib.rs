//! # HomeGuard Store
//!
//! Order placement and inventory core of a home-security storefront: a
//! product catalog with stock, per-user carts, address books, and an order
//! engine that turns a cart into an order atomically.
//!
//! ## Architecture
//!
//! Every resource lives in its own actor built on the workspace's
//! [`actor_framework`] crate. An actor owns its records, handles one request at
//! a time, and rolls back any request that fails. Stock reservation is a single
//! all-or-nothing catalog request, so concurrent checkouts can never oversell.
//!
//! Callers talk to actors through typed clients that take the caller's
//! [`Session`](session::Session). Ownership is enforced by looking records up
//! through the session's user; another user's IDs read as `NotFound`.
//!
//! ## Module Tour
//!
//! - [`model`] - Plain data: products, carts, addresses, orders, users, IDs
//! - [`catalog_actor`], [`cart_actor`], [`address_actor`], [`order_actor`],
//!   [`user_actor`] - one actor per resource, each with its entity hooks,
//!   actions and error enum
//! - [`clients`] - typed clients and the checkout service
//! - [`payment`] - the payment gateway contract and an in-memory gateway
//! - [`config`] - [`StoreConfig`](config::StoreConfig), from file and environment
//! - [`lifecycle`] - [`StoreSystem`](lifecycle::StoreSystem) wiring and logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let system = StoreSystem::new(StoreConfig::default(), Arc::new(InMemoryGateway::new()));
//! let staff = Session::staff(admin.id);
//! let bulb = system.catalog
//!     .create_product(&staff, ProductCreate::new("Smart Bulb", Category::Lighting, price, 10))
//!     .await?;
//! ```
//!
//! ## Testing
//!
//! Clients are unit tested against
//! [`actor_framework::mock::MockClient`]; the order engine is tested as a real
//! actor with mocked neighbours in `tests/order_actor_test.rs`; whole-store
//! scenarios live in `tests/integration_test.rs`.

pub mod address_actor;
pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod payment;
pub mod session;
pub mod user_actor;
