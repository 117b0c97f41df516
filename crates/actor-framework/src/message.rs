//! # Generic Messages
//!
//! The request envelope exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A boxed filter evaluated inside the actor against every stored entity.
pub struct Predicate<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    pub fn new(filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(filter))
    }

    /// Matches every entity.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The CRUD variants plus `Action` cover single-entity work. Three variants
/// operate on the store as a whole:
///
/// - **Ensure**: create-if-absent under a caller-chosen ID (one cart per user).
/// - **List**: every entity matching a [`Predicate`], in ID order.
/// - **Batch**: several actions applied all-or-nothing (reserve stock for
///   every line of an order).
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Ensure {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Batch {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>>,
    },
}
