use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::errors::DomainError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PERMISSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(create|read|update|delete|manage):[a-z][a-z0-9_]*$")
        .expect("valid permission regex")
});

pub const MIN_PASSWORD_LEN: usize = 8;

// ── Value types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trims and lower-cases before matching, so lookups are case-insensitive.
    pub fn parse(s: &str) -> Result<EmailAddress, DomainError> {
        let normalized = s.trim().to_lowercase();
        if EMAIL_RE.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(DomainError::invalid(format!("{} is not a valid email address", s)))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `<action>:<resource>`, e.g. `read:orders` or `manage:menu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionName(String);

impl PermissionName {
    pub fn parse(s: &str) -> Result<PermissionName, DomainError> {
        let s = s.trim();
        if PERMISSION_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::invalid(format!(
                "'{}' is not a valid permission name, expected <create|read|update|delete|manage>:<resource>",
                s
            )))
        }
    }

    pub fn action(&self) -> &str {
        self.0.split_once(':').map(|(a, _)| a).unwrap_or_default()
    }

    pub fn resource(&self) -> &str {
        self.0.split_once(':').map(|(_, r)| r).unwrap_or_default()
    }
}

impl AsRef<str> for PermissionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub role_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
    pub role_id: Option<Uuid>,
}

/// Sparse user update. `password` is plaintext and is hashed by the service
/// before the merged row is stored.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub role_id: Option<Uuid>,
}

impl UserUpdate {
    pub fn apply_to(&self, existing: &User, password_hash: Option<String>) -> User {
        let mut merged = existing.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(email) = &self.email {
            merged.email = email.clone();
        }
        if let Some(hash) = password_hash {
            merged.password_hash = hash;
        }
        if let Some(is_staff) = self.is_staff {
            merged.is_staff = is_staff;
        }
        if let Some(role_id) = self.role_id {
            merged.role_id = Some(role_id);
        }
        merged
    }
}

#[derive(Debug, Clone)]
pub struct UserWithRole {
    pub user: User,
    pub role: Option<Role>,
}

// ── Roles & permissions ──────────────────────────────────────────────────────

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RoleWithPermissions {
    pub role: Role,
    pub permissions: Vec<Permission>,
}
