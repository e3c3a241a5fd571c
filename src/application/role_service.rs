use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::access::{Permission, PermissionName, Role, RoleWithPermissions};
use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::ports::{PermissionRepository, RoleRepository};

const SOURCE: &str = "role_service";

pub struct RoleService<R, P> {
    roles: R,
    permissions: P,
    activity: Arc<dyn ActivityLogger>,
}

fn role_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(DomainError::invalid("role name must not be empty"));
    }
    Ok(name)
}

impl<R: RoleRepository, P: PermissionRepository> RoleService<R, P> {
    pub fn new(roles: R, permissions: P, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            roles,
            permissions,
            activity,
        }
    }

    fn load_role(&self, id: Uuid) -> Result<Role, DomainError> {
        self.roles
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Role", id))
    }

    fn ensure_role_name_free(&self, name: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        match self.roles.find_by_name(name)? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::Conflict(format!(
                "role '{}' already exists",
                name
            ))),
            _ => Ok(()),
        }
    }

    pub fn create_role(&self, name: &str) -> Result<Role, DomainError> {
        let name = role_name(name)?;
        self.ensure_role_name_free(&name, None)?;

        let role = self.roles.create(&Role {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        })?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "role.created").on("role", role.id));
        Ok(role)
    }

    pub fn get_role(&self, id: Uuid) -> Result<RoleWithPermissions, DomainError> {
        let role = self.load_role(id)?;
        let permissions = self.roles.permissions_of(id)?;
        Ok(RoleWithPermissions { role, permissions })
    }

    pub fn list_roles(&self) -> Result<Vec<Role>, DomainError> {
        self.roles.list()
    }

    pub fn rename_role(&self, id: Uuid, name: &str) -> Result<Role, DomainError> {
        let mut role = self.load_role(id)?;
        let name = role_name(name)?;
        self.ensure_role_name_free(&name, Some(id))?;

        role.name = name;
        let saved = self.roles.update(&role)?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "role.renamed").on("role", id));
        Ok(saved)
    }

    /// Users holding the role are left without one.
    pub fn delete_role(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.roles.delete(id)? {
            return Err(DomainError::not_found("Role", id));
        }
        self.activity
            .record(ActivityEvent::warn(SOURCE, "role.deleted").on("role", id));
        Ok(())
    }

    /// Replaces the whole permission set. Every id must exist.
    pub fn set_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<RoleWithPermissions, DomainError> {
        let role = self.load_role(role_id)?;

        let wanted: Vec<Uuid> = permission_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let found = self.permissions.find_many(&wanted)?;
        if found.len() != wanted.len() {
            let missing: Vec<String> = wanted
                .iter()
                .filter(|id| !found.iter().any(|p| p.id == **id))
                .map(Uuid::to_string)
                .collect();
            return Err(DomainError::NotFound(format!(
                "Permission {}",
                missing.join(", ")
            )));
        }

        self.roles.replace_permissions(role_id, &wanted)?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "role.permissions_replaced")
                .on("role", role_id)
                .with_metadata(json!({ "permissions": found.iter().map(|p| p.name.as_str()).collect::<Vec<_>>() })),
        );
        Ok(RoleWithPermissions {
            role,
            permissions: self.roles.permissions_of(role_id)?,
        })
    }

    pub fn create_permission(&self, name: &str) -> Result<Permission, DomainError> {
        let name = PermissionName::parse(name)?;
        if self.permissions.find_by_name(name.as_ref())?.is_some() {
            return Err(DomainError::Conflict(format!(
                "permission '{}' already exists",
                name
            )));
        }

        let permission = self.permissions.create(&Permission {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        })?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "permission.created").on("permission", permission.id),
        );
        Ok(permission)
    }

    pub fn list_permissions(&self) -> Result<Vec<Permission>, DomainError> {
        self.permissions.list()
    }

    pub fn delete_permission(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.permissions.delete(id)? {
            return Err(DomainError::not_found("Permission", id));
        }
        self.activity
            .record(ActivityEvent::warn(SOURCE, "permission.deleted").on("permission", id));
        Ok(())
    }
}
