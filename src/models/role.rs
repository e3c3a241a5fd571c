use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::access::{Permission, Role};
use crate::schema::{permissions, role_permissions, roles};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PermissionRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Insertable)]
#[diesel(table_name = role_permissions)]
#[diesel(primary_key(role_id, permission_id))]
#[diesel(belongs_to(RoleRow, foreign_key = role_id))]
#[diesel(belongs_to(PermissionRow, foreign_key = permission_id))]
pub struct RolePermissionRow {
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

impl From<&Role> for RoleRow {
    fn from(r: &Role) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            created_at: r.created_at,
        }
    }
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<&Permission> for PermissionRow {
    fn from(p: &Permission) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            created_at: p.created_at,
        }
    }
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Permission {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}
