//! Typed wrappers around [`ResourceClient`](actor_framework::ResourceClient),
//! one per actor, plus [`CheckoutService`] which reads from several of them.

pub mod address_client;
pub mod cart_client;
pub mod catalog_client;
pub mod checkout;
pub mod order_client;
pub mod user_client;

pub use address_client::*;
pub use cart_client::*;
pub use catalog_client::*;
pub use checkout::*;
pub use order_client::*;
pub use user_client::*;
