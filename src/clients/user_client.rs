//! # User Client
//!
//! Registration and profile edits for shoppers, account administration for
//! staff.
use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::session::Session;
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the user actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<UserError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, user))]
    pub async fn register(&self, user: UserCreate) -> Result<User, UserError> {
        debug!(?user, "register called");
        let id = self.inner.create(user).await.map_err(Self::map_error)?;
        let user = self
            .get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        info!(user_id = %id, username = %user.username, "User registered");
        Ok(user)
    }

    /// The caller's own account.
    #[instrument(skip(self, session))]
    pub async fn profile(&self, session: &Session) -> Result<User, UserError> {
        let id = session.require_user()?;
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, session))]
    pub async fn edit_email(&self, session: &Session, email: String) -> Result<User, UserError> {
        let id = session.require_user()?;
        self.inner
            .update(id, UserUpdate::Email(email))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, session))]
    pub async fn edit_username(&self, session: &Session, username: String) -> Result<User, UserError> {
        let id = session.require_user()?;
        self.inner
            .update(id, UserUpdate::Username(username))
            .await
            .map_err(Self::map_error)
    }

    /// Every account, most recently joined first.
    #[instrument(skip(self, session))]
    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>, UserError> {
        session.require_staff()?;
        let mut users = self.find(|_: &User| true).await?;
        users.sort_by(|a, b| b.date_joined.cmp(&a.date_joined).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    /// Removes an account and its cart.
    #[instrument(skip(self, session))]
    pub async fn delete_user(&self, session: &Session, id: UserId) -> Result<(), UserError> {
        session.require_staff()?;
        self.delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
