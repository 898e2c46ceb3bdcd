//! Request principal.
//!
//! The identity provider sits in front of this service and forwards the resolved user as
//! `X-User-Id` (numeric) and `X-User-Role` (`customer` or `chef`).

use super::error::ApiError;
use crate::model::{Role, UserId};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}

impl CurrentUser {
    /// Rejects anyone who is not a chef.
    pub fn require_chef(&self) -> Result<(), ApiError> {
        match self.role {
            Role::Chef => Ok(()),
            Role::Customer => Err(ApiError::Unauthorized("chef access required".into())),
        }
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(*user);
        }

        let id = header(parts, USER_ID_HEADER)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .map(UserId)
            .ok_or_else(|| ApiError::Unauthorized("missing or malformed user id".into()))?;
        let role = header(parts, USER_ROLE_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("missing user role".into()))?
            .parse::<Role>()
            .map_err(ApiError::Unauthorized)?;

        let user = CurrentUser { id, role };
        parts.extensions.insert(user);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(headers: &[(&str, &str)]) -> Result<CurrentUser, ApiError> {
        let mut builder = Request::builder().uri("/cart");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_id_and_role() {
        let user = extract(&[("X-User-Id", "12"), ("X-User-Role", "Chef")]).await.unwrap();
        assert_eq!(user.id, UserId(12));
        assert_eq!(user.role, Role::Chef);
        assert!(user.require_chef().is_ok());
    }

    #[tokio::test]
    async fn missing_or_bad_principal_is_unauthorized() {
        assert!(matches!(extract(&[]).await, Err(ApiError::Unauthorized(_))));
        assert!(matches!(
            extract(&[("X-User-Id", "abc"), ("X-User-Role", "chef")]).await,
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            extract(&[("X-User-Id", "1"), ("X-User-Role", "admin")]).await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn customers_are_not_chefs() {
        let user = extract(&[("X-User-Id", "3"), ("X-User-Role", "customer")]).await.unwrap();
        assert!(matches!(user.require_chef(), Err(ApiError::Unauthorized(_))));
    }
}
