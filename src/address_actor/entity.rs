//! ActorEntity trait implementation for the AddressBook domain type.
//!
//! All of a user's addresses live in one entity, so `SetDefault` is a single
//! mutation of that entity: no reader can observe zero or two defaults.

use super::actions::{AddressAction, AddressActionResult};
use super::error::AddressError;
use crate::model::{Address, AddressBook, AddressBookCreate, AddressForm, AddressId, IdSequence, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn not_found(id: AddressId) -> AddressError {
    AddressError::NotFound(id.to_string())
}

impl Address {
    fn apply(&mut self, form: AddressForm) {
        self.name = form.name.trim().to_string();
        self.address_line = form.address_line.trim().to_string();
        self.pincode = form.pincode.trim().to_string();
        self.phone = form.phone.trim().to_string();
    }
}

impl AddressBook {
    fn require(&mut self, id: AddressId) -> Result<&mut Address, AddressError> {
        self.get_mut(id).ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl ActorEntity for AddressBook {
    type Id = UserId;
    type Create = AddressBookCreate;
    type Update = ();
    type Action = AddressAction;
    type ActionResult = AddressActionResult;
    /// Source of address IDs, shared by every book.
    type Context = IdSequence;
    type Error = AddressError;

    fn from_create_params(id: UserId, _params: AddressBookCreate) -> Result<Self, Self::Error> {
        Ok(AddressBook::new(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &IdSequence) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_delete(&self, _ctx: &IdSequence) -> Result<(), Self::Error> {
        match self.addresses.iter().find(|a| a.order_refs > 0) {
            Some(pinned) => Err(AddressError::Protected(pinned.id)),
            None => Ok(()),
        }
    }

    async fn handle_action(
        &mut self,
        action: AddressAction,
        ids: &IdSequence,
    ) -> Result<AddressActionResult, Self::Error> {
        match action {
            AddressAction::Add(form) => {
                form.validate()?;
                let mut address = Address {
                    id: ids.next(),
                    name: String::new(),
                    address_line: String::new(),
                    pincode: String::new(),
                    phone: String::new(),
                    is_default: false,
                    order_refs: 0,
                };
                address.apply(form);
                self.addresses.push(address.clone());
                Ok(AddressActionResult::Add(address))
            }
            AddressAction::Edit { id, form } => {
                form.validate()?;
                let address = self.require(id)?;
                address.apply(form);
                Ok(AddressActionResult::Edit(address.clone()))
            }
            AddressAction::SetDefault(id) => {
                self.require(id)?;
                for address in &mut self.addresses {
                    address.is_default = address.id == id;
                }
                let address = self.require(id)?;
                Ok(AddressActionResult::SetDefault(address.clone()))
            }
            AddressAction::Remove(id) => {
                let address = self.require(id)?;
                if address.order_refs > 0 {
                    return Err(AddressError::Protected(id));
                }
                self.addresses.retain(|a| a.id != id);
                Ok(AddressActionResult::Remove(()))
            }
            AddressAction::Reference(id) => {
                let address = self.require(id)?;
                address.order_refs += 1;
                Ok(AddressActionResult::Reference(address.clone()))
            }
            AddressAction::Release(id) => {
                let address = self.require(id)?;
                address.order_refs = address.order_refs.saturating_sub(1);
                Ok(AddressActionResult::Release(()))
            }
            AddressAction::RetainReferenced => {
                self.addresses.retain(|a| a.order_refs > 0);
                Ok(AddressActionResult::RetainReferenced(self.addresses.len()))
            }
        }
    }
}
