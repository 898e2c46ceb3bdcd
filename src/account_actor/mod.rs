//! # Account Actor
//!
//! Directory of user profiles. The marketplace only needs it to turn a chef or buyer
//! id into a display name; credentials live with the identity provider.
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Account`]
//! - [`error`] - [`AccountError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AccountClient;
use crate::model::Account;
use resource_actor::ResourceActor;

/// Creates a new account actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, AccountClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AccountClient::new(generic_client))
}
