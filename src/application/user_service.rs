use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::PasswordHasher;
use crate::domain::access::{EmailAddress, NewUser, User, UserUpdate, UserWithRole, MIN_PASSWORD_LEN};
use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::{RoleRepository, UserRepository};

const SOURCE: &str = "user_service";

pub struct UserService<U, R> {
    users: U,
    roles: R,
    hasher: PasswordHasher,
    activity: Arc<dyn ActivityLogger>,
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::invalid(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

impl<U: UserRepository, R: RoleRepository> UserService<U, R> {
    pub fn new(users: U, roles: R, hasher: PasswordHasher, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            users,
            roles,
            hasher,
            activity,
        }
    }

    fn ensure_role(&self, role_id: Option<Uuid>) -> Result<(), DomainError> {
        if let Some(id) = role_id {
            if self.roles.find_by_id(id)?.is_none() {
                return Err(DomainError::invalid(format!("role {} does not exist", id)));
            }
        }
        Ok(())
    }

    fn ensure_email_free(&self, email: &EmailAddress, except: Option<Uuid>) -> Result<(), DomainError> {
        match self.users.find_by_email(email.as_ref())? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::Conflict(format!(
                "email {} is already registered",
                email.as_ref()
            ))),
            _ => Ok(()),
        }
    }

    fn with_role(&self, user: User) -> Result<UserWithRole, DomainError> {
        let role = match user.role_id {
            Some(id) => self.roles.find_by_id(id)?,
            None => None,
        };
        Ok(UserWithRole { user, role })
    }

    pub fn create_user(&self, input: NewUser) -> Result<UserWithRole, DomainError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::invalid("name must not be empty"));
        }
        let email = EmailAddress::parse(&input.email)?;
        validate_password(&input.password)?;
        self.ensure_role(input.role_id)?;
        self.ensure_email_free(&email, None)?;

        let now = Utc::now();
        let user = self.users.create(&User {
            id: Uuid::new_v4(),
            name,
            email: email.as_ref().to_string(),
            password_hash: self.hasher.hash(&input.password)?,
            is_staff: input.is_staff,
            role_id: input.role_id,
            created_at: now,
            updated_at: now,
        })?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "user.created").on("user", user.id));
        self.with_role(user)
    }

    pub fn get_user(&self, id: Uuid) -> Result<UserWithRole, DomainError> {
        let user = self
            .users
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("User", id))?;
        self.with_role(user)
    }

    pub fn list_users(&self, page: PageRequest) -> Result<ListResult<User>, DomainError> {
        self.users.list(page)
    }

    pub fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<UserWithRole, DomainError> {
        let existing = self
            .users
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let mut update = update;
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::invalid("name must not be empty"));
            }
        }
        if let Some(raw) = update.email.as_ref() {
            let email = EmailAddress::parse(raw)?;
            self.ensure_email_free(&email, Some(id))?;
            update.email = Some(email.as_ref().to_string());
        }
        self.ensure_role(update.role_id)?;

        let password_hash = match update.password.as_deref() {
            Some(password) => {
                validate_password(password)?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        let mut merged = update.apply_to(&existing, password_hash);
        merged.updated_at = Utc::now();
        let saved = self.users.update(&merged)?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "user.updated").on("user", id));
        self.with_role(saved)
    }

    pub fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.users.delete(id)? {
            return Err(DomainError::not_found("User", id));
        }
        self.activity
            .record(ActivityEvent::warn(SOURCE, "user.deleted").on("user", id));
        Ok(())
    }

    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserWithRole, DomainError> {
        let normalized = email.trim().to_lowercase();
        let user = match self.users.find_by_email(&normalized)? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => user,
            _ => {
                self.activity
                    .record(ActivityEvent::warn(SOURCE, "login.failed"));
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.activity
            .record(ActivityEvent::info(SOURCE, "login.succeeded").on("user", user.id));
        self.with_role(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{InMemoryAccess, RecordingLogger};
    use crate::domain::access::Role;

    fn service() -> (UserService<InMemoryAccess, InMemoryAccess>, InMemoryAccess, RecordingLogger) {
        let store = InMemoryAccess::default();
        let logger = RecordingLogger::default();
        let service = UserService::new(
            store.clone(),
            store.clone(),
            PasswordHasher::new(4),
            Arc::new(logger.clone()),
        );
        (service, store, logger)
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Sam".to_string(),
            email: email.to_string(),
            password: "testpassword".to_string(),
            is_staff: true,
            role_id: None,
        }
    }

    #[test]
    fn password_is_stored_hashed() {
        let (service, store, _) = service();
        let created = service.create_user(new_user("sam@example.com")).unwrap();

        let stored = store.users.all().pop().unwrap();
        assert_eq!(stored.id, created.user.id);
        assert_ne!(stored.password_hash, "testpassword");
        assert!(stored.password_hash.starts_with("$2"));
    }

    #[test]
    fn duplicate_email_conflicts_regardless_of_case() {
        let (service, _, _) = service();
        service.create_user(new_user("sam@example.com")).unwrap();

        assert!(matches!(
            service.create_user(new_user("SAM@example.com")),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn short_password_and_bad_email_are_invalid() {
        let (service, _, _) = service();
        let mut short = new_user("a@example.com");
        short.password = "short".to_string();
        assert!(matches!(service.create_user(short), Err(DomainError::InvalidInput(_))));
        assert!(matches!(
            service.create_user(new_user("nope")),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn login_round_trip() {
        let (service, _, logger) = service();
        service.create_user(new_user("chef@example.com")).unwrap();

        assert!(service.authenticate("Chef@Example.com", "testpassword").is_ok());
        assert!(matches!(
            service.authenticate("chef@example.com", "wrongpassword"),
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("ghost@example.com", "testpassword"),
            Err(DomainError::InvalidCredentials)
        ));
        assert!(logger.actions().contains(&"login.failed".to_string()));
    }

    #[test]
    fn update_rehashes_password_and_keeps_other_fields() {
        let (service, store, _) = service();
        let role = RoleRepository::create(
            &store,
            &Role {
                id: Uuid::new_v4(),
                name: "admin".to_string(),
                created_at: Utc::now(),
            },
        )
        .unwrap();
        let created = service.create_user(new_user("sam@example.com")).unwrap();

        let updated = service
            .update_user(
                created.user.id,
                UserUpdate {
                    password: Some("anotherpassword".to_string()),
                    role_id: Some(role.id),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.user.name, "Sam");
        assert_eq!(updated.role.map(|r| r.name).as_deref(), Some("admin"));
        assert!(service.authenticate("sam@example.com", "anotherpassword").is_ok());
        assert!(service.authenticate("sam@example.com", "testpassword").is_err());
    }
}
