//! Typed identifiers.
//!
//! Every resource gets its own `u32` newtype so an `AddressId` can never be
//! passed where an `OrderId` is expected. `From<u32>` lets the actor framework
//! allocate them; `Display` renders the prefixed form used in logs
//! (`product_3`, `order_12`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(UserId, "user");
define_id!(ProductId, "product");
define_id!(CartItemId, "item");
define_id!(AddressId, "address");
define_id!(OrderId, "order");

/// Shared counter for IDs minted inside an entity rather than by an actor
/// (cart lines, addresses). Clones hand out from the same sequence.
#[derive(Debug, Clone)]
pub struct IdSequence(Arc<AtomicU32>);

impl Default for IdSequence {
    fn default() -> Self {
        Self(Arc::new(AtomicU32::new(1)))
    }
}

impl IdSequence {
    pub fn next<I: From<u32>>(&self) -> I {
        I::from(self.0.fetch_add(1, Ordering::SeqCst))
    }
}
