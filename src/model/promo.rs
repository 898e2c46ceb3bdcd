use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt::Display;
use std::str::FromStr;

/// A time-bounded percentage discount.
///
/// Codes are case-insensitive and normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    pub code: String,
    pub discount_percent: u32,
    pub expires_at: DateTime<Utc>,
}

impl PromoCode {
    pub fn new(code: &str, discount_percent: u32, expires_at: DateTime<Utc>) -> Self {
        Self {
            code: normalize_code(code),
            discount_percent,
            expires_at,
        }
    }

    /// A code that stays valid through the whole of `last_day` (UTC).
    pub fn valid_through(code: &str, discount_percent: u32, last_day: NaiveDate) -> Self {
        let end = last_day.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default());
        Self::new(code, discount_percent, end.and_utc())
    }

    /// Active while `now <= expires_at`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid promo code entry '{entry}': {reason}")]
pub struct PromoParseError {
    pub entry: String,
    pub reason: String,
}

/// Parses `CODE:PERCENT:YYYY-MM-DD`.
impl FromStr for PromoCode {
    type Err = PromoParseError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| PromoParseError {
            entry: entry.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = entry.trim().splitn(3, ':');
        let code = parts
            .next()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| fail("missing code"))?;
        let percent: u32 = parts
            .next()
            .ok_or_else(|| fail("missing percent"))?
            .trim()
            .parse()
            .map_err(|_| fail("percent is not a number"))?;
        if percent == 0 || percent > 100 {
            return Err(fail("percent must be between 1 and 100"));
        }
        let last_day = parts
            .next()
            .ok_or_else(|| fail("missing expiry date"))
            .and_then(|d| {
                NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").map_err(|_| fail("bad expiry date"))
            })?;

        Ok(Self::valid_through(code, percent, last_day))
    }
}

impl Display for PromoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}%)", self.code, self.discount_percent)
    }
}
