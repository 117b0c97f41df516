//! Pure data structures. Each resource implements
//! [`ActorEntity`](actor_framework::ActorEntity) in its actor module.

pub mod address;
pub mod cart;
pub mod ids;
pub mod order;
pub mod product;
pub mod user;

pub use address::*;
pub use cart::*;
pub use ids::*;
pub use order::*;
pub use product::*;
pub use user::*;
