use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::access::User;
use crate::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub role_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct UserChangeset {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub role_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
            is_staff: u.is_staff,
            role_id: u.role_id,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl From<&User> for UserChangeset {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
            is_staff: u.is_staff,
            role_id: u.role_id,
            updated_at: u.updated_at,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            is_staff: row.is_staff,
            role_id: row.role_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
