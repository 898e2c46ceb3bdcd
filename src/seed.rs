//! Start-up data for the catalog and account directory.
//!
//! Records are stored with `Ensure` under the ids given in the seed, so loading the same
//! seed twice is harmless and later auto-allocated ids never collide with seeded ones.

use crate::account_actor::AccountError;
use crate::catalog_actor::CatalogError;
use crate::clients::{AccountClient, CatalogClient};
use crate::model::{AccountCreate, MealCreate, MealId, Role, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedAccount {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMeal {
    pub id: MealId,
    pub chef_id: UserId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "listed")]
    pub available: bool,
    #[serde(default)]
    pub image: Option<String>,
}

fn listed() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub meals: Vec<SeedMeal>,
}

impl CatalogSeed {
    /// A small demo kitchen: two chefs, one customer, five meals (one off the menu).
    pub fn demo() -> Self {
        let account = |id, name: &str, role| SeedAccount {
            id: UserId(id),
            name: name.into(),
            role,
        };
        let meal = |id, chef, name: &str, cents, available| SeedMeal {
            id: MealId(id),
            chef_id: UserId(chef),
            name: name.into(),
            price: Decimal::new(cents, 2),
            available,
            image: Some(format!("/images/meals/{id}.jpg")),
        };

        Self {
            accounts: vec![
                account(1, "Meera Iyer", Role::Chef),
                account(2, "Tomás Rivera", Role::Chef),
                account(101, "Alex Kim", Role::Customer),
            ],
            meals: vec![
                meal(1, 1, "Paneer Butter Masala", 1250, true),
                meal(2, 1, "Masala Dosa", 900, true),
                meal(3, 2, "Chicken Tamales", 1100, true),
                meal(4, 2, "Pozole Rojo", 1350, true),
                meal(5, 2, "Horchata", 350, false),
            ],
        }
    }

    pub async fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Stores every account and meal.
    pub async fn apply(&self, catalog: &CatalogClient, accounts: &AccountClient) -> Result<(), SeedError> {
        for account in &self.accounts {
            accounts
                .ensure_account(
                    account.id,
                    AccountCreate {
                        name: account.name.clone(),
                        role: account.role,
                    },
                )
                .await?;
        }
        for meal in &self.meals {
            catalog
                .ensure_meal(
                    meal.id,
                    MealCreate {
                        chef_id: meal.chef_id,
                        name: meal.name.clone(),
                        price: meal.price,
                        available: meal.available,
                        image: meal.image.clone(),
                    },
                )
                .await?;
        }
        info!(
            accounts = self.accounts.len(),
            meals = self.meals.len(),
            "Catalog seeded"
        );
        Ok(())
    }
}
