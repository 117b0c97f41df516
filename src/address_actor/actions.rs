//! Custom actions for the address book actor.

use crate::model::{Address, AddressForm, AddressId};

#[derive(Debug, Clone)]
pub enum AddressAction {
    Add(AddressForm),
    Edit { id: AddressId, form: AddressForm },
    /// Clears the flag on every other address and sets it on `id`.
    SetDefault(AddressId),
    Remove(AddressId),
    /// Pins an address for an order being placed.
    Reference(AddressId),
    /// Undoes a `Reference`.
    Release(AddressId),
    /// Drops every address no order points at. Returns how many remain.
    RetainReferenced,
}

/// Results from AddressActions - variants match 1:1 with AddressAction
#[derive(Debug, Clone)]
pub enum AddressActionResult {
    Add(Address),
    Edit(Address),
    SetDefault(Address),
    Remove(()),
    Reference(Address),
    Release(()),
    RetainReferenced(usize),
}
