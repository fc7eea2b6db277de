//! Caller identity and role checks.
//!
//! Authentication happens upstream; by the time a request reaches a handler
//! its caller is an [`AuthUser`] in the request extensions.

use crate::error::{ApiError, ApiResult};
use crate::models::user::Role;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Trusts the identity headers set by the authenticating gateway in front of
/// this service. Requests without them continue anonymously.
pub async fn identity_from_gateway(mut req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthUser>().is_none() {
        if let Some(user) = identity_from_headers(&req) {
            req.extensions_mut().insert(user);
        }
    }
    next.run(req).await
}

fn identity_from_headers(req: &Request) -> Option<AuthUser> {
    let headers = req.headers();
    let id = headers.get(USER_ID_HEADER)?.to_str().ok()?;
    let role = headers.get(USER_ROLE_HEADER)?.to_str().ok()?;

    match Uuid::parse_str(id.trim()) {
        Ok(id) => Some(AuthUser {
            id,
            role: Role::from(role.trim()),
        }),
        Err(e) => {
            warn!("Ignoring malformed {} header '{}': {}", USER_ID_HEADER, id, e);
            None
        }
    }
}

/// The one access rule every handler applies: the caller holds one of
/// `roles`, or owns the resource.
pub fn is_authorized(caller: &AuthUser, owner: Option<Uuid>, roles: &[Role]) -> bool {
    roles.contains(&caller.role) || owner == Some(caller.id)
}

pub fn require(
    caller: &AuthUser,
    owner: Option<Uuid>,
    roles: &[Role],
    denial: &str,
) -> ApiResult<()> {
    if is_authorized(caller, owner, roles) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(denial.to_string()))
    }
}
