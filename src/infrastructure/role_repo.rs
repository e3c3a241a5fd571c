use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::access::{Permission, Role};
use crate::domain::errors::DomainError;
use crate::domain::ports::{PermissionRepository, RoleRepository};
use crate::models::role::{PermissionRow, RolePermissionRow, RoleRow};
use crate::schema::{permissions, role_permissions, roles, users};

use super::insert_failed;

// ── Roles ────────────────────────────────────────────────────────────────────

pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RoleRepository for DieselRoleRepository {
    fn create(&self, role: &Role) -> Result<Role, DomainError> {
        let mut conn = self.pool.get()?;

        let row: RoleRow = diesel::insert_into(roles::table)
            .values(&RoleRow::from(role))
            .returning(RoleRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("role", e))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(roles::table
            .find(id)
            .select(RoleRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(roles::table
            .filter(roles::name.eq(name))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn list(&self) -> Result<Vec<Role>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(roles::table
            .select(RoleRow::as_select())
            .order(roles::name.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn update(&self, role: &Role) -> Result<Role, DomainError> {
        let mut conn = self.pool.get()?;

        let row: RoleRow = diesel::update(roles::table.find(role.id))
            .set(roles::name.eq(&role.name))
            .returning(RoleRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::update(users::table.filter(users::role_id.eq(id)))
                .set(users::role_id.eq(None::<Uuid>))
                .execute(conn)?;
            diesel::delete(role_permissions::table.filter(role_permissions::role_id.eq(id)))
                .execute(conn)?;
            let affected = diesel::delete(roles::table.find(id)).execute(conn)?;
            Ok(affected > 0)
        })
    }

    fn permissions_of(&self, role_id: Uuid) -> Result<Vec<Permission>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(role_permissions::table
            .inner_join(permissions::table)
            .filter(role_permissions::role_id.eq(role_id))
            .select(PermissionRow::as_select())
            .order(permissions::name.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn replace_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let links: Vec<RolePermissionRow> = permission_ids
            .iter()
            .map(|&permission_id| RolePermissionRow {
                role_id,
                permission_id,
            })
            .collect();

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(role_permissions::table.filter(role_permissions::role_id.eq(role_id)))
                .execute(conn)?;
            if !links.is_empty() {
                diesel::insert_into(role_permissions::table)
                    .values(&links)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .map_err(|e| insert_failed("role permission", e))?;
            }
            Ok(())
        })
    }
}

// ── Permissions ──────────────────────────────────────────────────────────────

pub struct DieselPermissionRepository {
    pool: DbPool,
}

impl DieselPermissionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PermissionRepository for DieselPermissionRepository {
    fn create(&self, permission: &Permission) -> Result<Permission, DomainError> {
        let mut conn = self.pool.get()?;

        let row: PermissionRow = diesel::insert_into(permissions::table)
            .values(&PermissionRow::from(permission))
            .returning(PermissionRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("permission", e))?;

        Ok(row.into())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Permission>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(permissions::table
            .filter(permissions::name.eq(name))
            .select(PermissionRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(permissions::table
            .filter(permissions::id.eq_any(ids))
            .select(PermissionRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn list(&self) -> Result<Vec<Permission>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(permissions::table
            .select(PermissionRow::as_select())
            .order(permissions::name.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(permissions::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
