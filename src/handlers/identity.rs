use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const ROLE_HEADER: &str = "X-User-Role";
const ADMIN_ROLE: &str = "admin";

/// The caller's user id, taken from the `X-User-Id` header set by the
/// authenticating gateway in front of this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

fn user_from_request(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| AppError::Unauthorized(format!("missing {} header", USER_ID_HEADER)))?;
    raw.to_str()
        .ok()
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .map(CurrentUser)
        .ok_or_else(|| AppError::Unauthorized(format!("malformed {} header", USER_ID_HEADER)))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(user_from_request(req))
    }
}

/// A caller the gateway has marked with the admin role. Catalog writes
/// require it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAdmin(pub Uuid);

fn admin_from_request(req: &HttpRequest) -> Result<CurrentAdmin, AppError> {
    let CurrentUser(id) = user_from_request(req)?;
    let is_admin = req
        .headers()
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|role| role.trim().eq_ignore_ascii_case(ADMIN_ROLE));
    if !is_admin {
        return Err(AppError::Forbidden("admin role required".to_string()));
    }
    Ok(CurrentAdmin(id))
}

impl FromRequest for CurrentAdmin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(admin_from_request(req))
    }
}
