//! Caller identity.
//!
//! The presentation layer resolves cookies and logins; the core only sees the
//! result: which user is calling, and whether that user is staff.

use crate::error::AccessError;
use crate::model::UserId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserId>,
    is_staff: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn customer(user: UserId) -> Self {
        Self {
            user: Some(user),
            is_staff: false,
        }
    }

    pub fn staff(user: UserId) -> Self {
        Self {
            user: Some(user),
            is_staff: true,
        }
    }

    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn require_user(&self) -> Result<UserId, AccessError> {
        self.user.ok_or(AccessError::Unauthenticated)
    }

    pub fn require_staff(&self) -> Result<UserId, AccessError> {
        let user = self.require_user()?;
        if self.is_staff {
            Ok(user)
        } else {
            Err(AccessError::Forbidden)
        }
    }
}
