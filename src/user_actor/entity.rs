//! ActorEntity trait implementation for the User domain type.

use super::error::UserError;
use super::UserContext;
use crate::error::FieldErrors;
use crate::model::{check_email, check_username, User, UserCreate, UserId, UserUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = UserContext;
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        check_username(&params.username, &mut errors);
        check_email(&params.email, &mut errors);
        errors.into_result()?;

        Ok(User {
            id,
            username: params.username.trim().to_string(),
            email: params.email.trim().to_string(),
            is_staff: params.is_staff,
            date_joined: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &UserContext) -> Result<(), Self::Error> {
        let mut errors = FieldErrors::new();
        match update {
            UserUpdate::Email(email) => {
                check_email(&email, &mut errors);
                errors.into_result()?;
                self.email = email.trim().to_string();
            }
            UserUpdate::Username(username) => {
                check_username(&username, &mut errors);
                errors.into_result()?;
                self.username = username.trim().to_string();
            }
        }
        Ok(())
    }

    /// The cart and the address book go with the account. Addresses that
    /// orders still ship to are kept.
    async fn on_delete(&self, ctx: &UserContext) -> Result<(), Self::Error> {
        ctx.carts.drop_cart(self.id).await?;
        let kept = ctx.addresses.drop_book(self.id).await?;
        info!(user_id = %self.id, kept_addresses = kept, "Cart and addresses dropped with account");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &UserContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn conflicts_with(&self, other: &Self) -> Option<Self::Error> {
        if self.username == other.username {
            return Some(FieldErrors::single("username", "This username is already taken.").into());
        }
        if self.email.eq_ignore_ascii_case(&other.email) {
            return Some(FieldErrors::single("email", "This email is already in use.").into());
        }
        None
    }
}
