use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::access::User;
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::UserRepository;
use crate::models::user::{UserChangeset, UserRow};
use crate::schema::users;

use super::insert_failed;

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(&UserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("user", e))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn list(&self, page: PageRequest) -> Result<ListResult<User>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = users::table.count().get_result(conn)?;
            let rows = users::table
                .select(UserRow::as_select())
                .order(users::created_at.desc())
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: rows.into_iter().map(Into::into).collect(),
                total,
            })
        })
    }

    fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;

        let row: UserRow = diesel::update(users::table.find(user.id))
            .set(&UserChangeset::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(users::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
