//! # Catalog Client
//!
//! Provides a high-level API for interacting with the catalog actor. It is also the
//! production [`Catalog`] handed to the cart and order actors.

use crate::catalog_actor::{Catalog, CatalogError, MealAction};
use crate::model::{Meal, MealCreate, MealId, MealInfo};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Meal>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Meal>) -> Self {
        Self { inner }
    }

    /// Stores a meal under a known id, leaving an existing listing untouched.
    #[instrument(skip(self))]
    pub async fn ensure_meal(&self, id: MealId, params: MealCreate) -> Result<Meal, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.ensure(id, params).await?)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    #[instrument(skip(self))]
    async fn find_meal(&self, id: MealId) -> Result<MealInfo, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, MealAction::Find).await?)
    }
}

#[async_trait]
impl ActorClient<Meal> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Meal> {
        &self.inner
    }

    fn map_error(e: FrameworkError<CatalogError>) -> Self::Error {
        e.into()
    }
}
