//! # Address Client
//!
//! Shoppers reach only their own book: every method resolves the book from the
//! session, so an address ID belonging to someone else is simply `NotFound`.
use crate::address_actor::{AddressAction, AddressActionResult, AddressError};
use crate::model::{Address, AddressBook, AddressBookCreate, AddressForm, AddressId, UserId};
use crate::session::Session;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Client for interacting with the address book actor.
#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<AddressBook>,
}

#[async_trait]
impl ActorClient<AddressBook> for AddressClient {
    type Error = AddressError;

    fn inner(&self) -> &ResourceClient<AddressBook> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<AddressError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => AddressError::NotFound(id),
            Err(other) => AddressError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: AddressActionResult) -> AddressError {
    AddressError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl AddressClient {
    pub fn new(inner: ResourceClient<AddressBook>) -> Self {
        Self { inner }
    }

    /// Runs an action that targets one address. A user without a book has no
    /// addresses, so that case is `NotFound` for the address.
    async fn act_on(
        &self,
        user: UserId,
        id: AddressId,
        action: AddressAction,
    ) -> Result<AddressActionResult, AddressError> {
        match self.inner.perform_action(user, action).await {
            Ok(result) => Ok(result),
            Err(FrameworkError::NotFound(_)) => Err(AddressError::NotFound(id.to_string())),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn add(&self, session: &Session, form: AddressForm) -> Result<Address, AddressError> {
        let user = session.require_user()?;
        form.validate()?;
        self.inner
            .ensure(user, AddressBookCreate)
            .await
            .map_err(Self::map_error)?;
        match self
            .inner
            .perform_action(user, AddressAction::Add(form))
            .await
            .map_err(Self::map_error)?
        {
            AddressActionResult::Add(address) => {
                info!(%user, address_id = %address.id, "Address added");
                Ok(address)
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn update(
        &self,
        session: &Session,
        id: AddressId,
        form: AddressForm,
    ) -> Result<Address, AddressError> {
        let user = session.require_user()?;
        match self.act_on(user, id, AddressAction::Edit { id, form }).await? {
            AddressActionResult::Edit(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn set_default(&self, session: &Session, id: AddressId) -> Result<Address, AddressError> {
        let user = session.require_user()?;
        match self.act_on(user, id, AddressAction::SetDefault(id)).await? {
            AddressActionResult::SetDefault(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }

    /// Fails with `Protected` while any order ships to the address.
    #[instrument(skip(self, session))]
    pub async fn remove(&self, session: &Session, id: AddressId) -> Result<(), AddressError> {
        let user = session.require_user()?;
        self.act_on(user, id, AddressAction::Remove(id)).await?;
        Ok(())
    }

    /// The caller's addresses, in the order they were added.
    #[instrument(skip(self, session))]
    pub async fn list(&self, session: &Session) -> Result<Vec<Address>, AddressError> {
        let user = session.require_user()?;
        self.addresses_of(user).await
    }

    #[instrument(skip(self, session))]
    pub async fn get_address(&self, session: &Session, id: AddressId) -> Result<Address, AddressError> {
        let user = session.require_user()?;
        self.addresses_of(user)
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AddressError::NotFound(id.to_string()))
    }

    // --- Used by the order engine and checkout ---

    pub async fn addresses_of(&self, user: UserId) -> Result<Vec<Address>, AddressError> {
        Ok(self
            .get(user)
            .await?
            .map(|book| book.addresses)
            .unwrap_or_default())
    }

    /// Checks that `id` belongs to `user` and pins it against removal.
    pub async fn reference(&self, user: UserId, id: AddressId) -> Result<Address, AddressError> {
        match self.act_on(user, id, AddressAction::Reference(id)).await? {
            AddressActionResult::Reference(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }

    pub async fn release(&self, user: UserId, id: AddressId) -> Result<(), AddressError> {
        self.act_on(user, id, AddressAction::Release(id)).await?;
        Ok(())
    }

    // --- Used by account administration ---

    /// Removes a departing user's addresses. Addresses that orders still ship
    /// to are kept, and the book with them. Returns how many were kept.
    pub async fn drop_book(&self, user: UserId) -> Result<usize, AddressError> {
        let kept = match self
            .inner
            .perform_action(user, AddressAction::RetainReferenced)
            .await
        {
            Ok(AddressActionResult::RetainReferenced(kept)) => kept,
            Ok(other) => return Err(unexpected(other)),
            Err(FrameworkError::NotFound(_)) => return Ok(0),
            Err(e) => return Err(Self::map_error(e)),
        };
        if kept == 0 {
            match self.inner.delete(user).await {
                Ok(()) | Err(FrameworkError::NotFound(_)) => {}
                Err(e) => return Err(Self::map_error(e)),
            }
        }
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_invalid_form_never_reaches_actor() {
        let mock = MockClient::<AddressBook>::new();
        let addresses = AddressClient::new(mock.client());

        let err = addresses
            .add(&Session::customer(UserId(1)), AddressForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AddressError::ValidationFailed(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_foreign_book_is_not_found() {
        let mut mock = MockClient::<AddressBook>::new();
        mock.expect_action(UserId(2))
            .return_err(FrameworkError::NotFound(UserId(2).to_string()));

        let addresses = AddressClient::new(mock.client());
        let err = addresses.reference(UserId(2), AddressId(5)).await.unwrap_err();
        assert_eq!(err, AddressError::NotFound("address_5".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_user_without_book_has_no_addresses() {
        let mut mock = MockClient::<AddressBook>::new();
        mock.expect_get(UserId(4)).return_ok(None);

        let addresses = AddressClient::new(mock.client());
        let list = addresses.list(&Session::customer(UserId(4))).await.unwrap();
        assert!(list.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_drop_book_deletes_only_unpinned_books() {
        let mut mock = MockClient::<AddressBook>::new();
        mock.expect_action(UserId(1))
            .return_ok(AddressActionResult::RetainReferenced(0));
        mock.expect_delete(UserId(1)).return_ok(());
        mock.expect_action(UserId(2))
            .return_ok(AddressActionResult::RetainReferenced(1));
        mock.expect_action(UserId(3))
            .return_err(FrameworkError::NotFound(UserId(3).to_string()));

        let addresses = AddressClient::new(mock.client());
        assert_eq!(addresses.drop_book(UserId(1)).await, Ok(0));
        assert_eq!(addresses.drop_book(UserId(2)).await, Ok(1));
        assert_eq!(addresses.drop_book(UserId(3)).await, Ok(0));
        mock.verify();
    }
}
