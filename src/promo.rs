//! # Promo Lookup
//!
//! The cart engine resolves promo codes through the [`PromoLookup`] capability it is
//! handed at start-up. [`StaticPromoTable`] is the in-memory implementation: the
//! built-in codes plus any configured through `PROMO_CODES`.

use crate::model::{normalize_code, PromoCode};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Resolves a code (any case) to its promo definition.
#[async_trait]
pub trait PromoLookup: Send + Sync {
    async fn lookup(&self, code: &str) -> Option<PromoCode>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticPromoTable {
    codes: HashMap<String, PromoCode>,
}

impl StaticPromoTable {
    pub fn new(codes: impl IntoIterator<Item = PromoCode>) -> Self {
        let mut table = Self::default();
        table.extend(codes);
        table
    }

    /// `WELCOME10` (10%) and `SAVE20` (20%), both valid through 2099-12-31.
    pub fn builtin() -> Self {
        let last_day = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or_default();
        Self::new([
            PromoCode::valid_through("WELCOME10", 10, last_day),
            PromoCode::valid_through("SAVE20", 20, last_day),
        ])
    }

    /// Adds codes, replacing any existing definition of the same code.
    pub fn extend(&mut self, codes: impl IntoIterator<Item = PromoCode>) {
        for promo in codes {
            self.codes.insert(promo.code.clone(), promo);
        }
    }
}

#[async_trait]
impl PromoLookup for StaticPromoTable {
    async fn lookup(&self, code: &str) -> Option<PromoCode> {
        self.codes.get(&normalize_code(code)).cloned()
    }
}
