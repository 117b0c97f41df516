//! Shipping addresses.
//!
//! Each user owns one `AddressBook` (keyed by `UserId`). Keeping all of a
//! user's addresses in a single entity makes the default flag a per-entity
//! invariant: setting a default is one request that clears and sets together.

use crate::error::FieldErrors;
use crate::model::{AddressId, UserId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: AddressId,
    pub name: String,
    pub address_line: String,
    pub pincode: String,
    pub phone: String,
    pub is_default: bool,
    /// Orders shipped to this address. Non-zero blocks removal.
    #[serde(skip)]
    pub order_refs: u32,
}

/// The four fields of the address form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub name: String,
    pub address_line: String,
    pub pincode: String,
    pub phone: String,
}

impl AddressForm {
    pub fn new(
        name: impl Into<String>,
        address_line: impl Into<String>,
        pincode: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address_line: address_line.into(),
            pincode: pincode.into(),
            phone: phone.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required.");
        }
        if self.address_line.trim().is_empty() {
            errors.add("address", "Address is required.");
        }
        let pincode = self.pincode.trim();
        if pincode.is_empty() {
            errors.add("pincode", "Pincode is required.");
        } else if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
            errors.add("pincode", "Pincode must be 6 digits.");
        }
        if self.phone.trim().is_empty() {
            errors.add("phone", "Phone number is required.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressBook {
    pub user_id: UserId,
    pub addresses: Vec<Address>,
}

/// Creation payload. The book's ID is the owner's `UserId`.
#[derive(Debug, Clone, Default)]
pub struct AddressBookCreate;

impl AddressBook {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            addresses: Vec::new(),
        }
    }

    pub fn get(&self, id: AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: AddressId) -> Option<&mut Address> {
        self.addresses.iter_mut().find(|a| a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_reports_every_field() {
        let errors = AddressForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required."));
        assert_eq!(errors.get("address"), Some("Address is required."));
        assert_eq!(errors.get("pincode"), Some("Pincode is required."));
        assert_eq!(errors.get("phone"), Some("Phone number is required."));
    }

    #[test]
    fn pincode_must_be_six_digits() {
        let form = AddressForm::new("Asha", "12 MG Road", "5600", "9876543210");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("pincode"), Some("Pincode must be 6 digits."));
        assert_eq!(errors.len(), 1);

        let form = AddressForm::new("Asha", "12 MG Road", "560001", "9876543210");
        assert!(form.validate().is_ok());
    }
}
