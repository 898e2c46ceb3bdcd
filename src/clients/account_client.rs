//! # Account Client
//!
//! Provides a high-level API for interacting with the account actor.

use crate::account_actor::AccountError;
use crate::model::{Account, AccountCreate, UserId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }

    /// Stores an account under an id issued by the identity provider.
    #[instrument(skip(self))]
    pub async fn ensure_account(&self, id: UserId, params: AccountCreate) -> Result<Account, AccountError> {
        debug!("Sending request");
        Ok(self.inner.ensure(id, params).await?)
    }

    /// The user's display name, `None` when the account is unknown.
    pub async fn display_name(&self, id: UserId) -> Result<Option<String>, AccountError> {
        Ok(self.get(id).await?.map(|account| account.name))
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError<AccountError>) -> Self::Error {
        e.into()
    }
}
