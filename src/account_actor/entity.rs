//! `ActorEntity` implementation for [`Account`].

use super::error::AccountError;
use crate::model::{Account, AccountCreate, UserId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate_name(name: &str) -> Result<(), AccountError> {
    if name.trim().is_empty() {
        return Err(AccountError::ValidationError("name is required".into()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Account {
    type Id = UserId;
    type Create = AccountCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = AccountError;

    async fn from_create_params(id: UserId, params: AccountCreate, _ctx: &()) -> Result<Self, AccountError> {
        validate_name(&params.name)?;
        Ok(Self {
            id,
            name: params.name,
            role: params.role,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), AccountError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), AccountError> {
        Ok(())
    }
}
