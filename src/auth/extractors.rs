//! Request guards. Put one of these in a handler signature to gate the route.
//!
//! * [`AuthUser`]  – any valid bearer token, else 401
//! * [`StaffUser`] – token with `is_staff`, else 403
//! * [`AdminUser`] – staff token carrying the `admin` role, else 403

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use super::jwt::{Claims, JwtError, JwtKeys};
use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[derive(Debug, Clone)]
pub struct StaffUser(pub Claims);

#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<Claims, AppError> {
    // Already validated by an earlier extractor on this request.
    if let Some(claims) = req.extensions().get::<Claims>() {
        return Ok(claims.clone());
    }

    let keys = req
        .app_data::<web::Data<JwtKeys>>()
        .ok_or_else(|| AppError::Internal("JWT keys are not configured".to_string()))?;

    let token = bearer_token(req).ok_or_else(|| {
        log::debug!("missing bearer token on {}", req.path());
        AppError::Unauthorized("Missing or malformed Authorization header".to_string())
    })?;

    let claims = keys.verify(token).map_err(|e| {
        log::warn!("rejected token on {}: {}", req.path(), e);
        match e {
            JwtError::Expired => AppError::Unauthorized("Token expired".to_string()),
            _ => AppError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    req.extensions_mut().insert(claims.clone());
    Ok(claims)
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(AuthUser))
    }
}

impl FromRequest for StaffUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|claims| {
            if claims.is_staff {
                Ok(StaffUser(claims))
            } else {
                Err(AppError::Forbidden("Staff access required".to_string()))
            }
        }))
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|claims| {
            if claims.is_admin() {
                Ok(AdminUser(claims))
            } else {
                Err(AppError::Forbidden("Administrator access required".to_string()))
            }
        }))
    }
}
