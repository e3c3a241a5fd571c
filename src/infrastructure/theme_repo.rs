use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ThemeRepository;
use crate::domain::theme::Theme;
use crate::models::theme::{ThemeChangeset, ThemeRow};
use crate::schema::themes;

use super::insert_failed;

pub struct DieselThemeRepository {
    pool: DbPool,
}

impl DieselThemeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ThemeRepository for DieselThemeRepository {
    fn create(&self, theme: &Theme) -> Result<Theme, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ThemeRow = diesel::insert_into(themes::table)
            .values(&ThemeRow::from(theme))
            .returning(ThemeRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("theme", e))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Theme>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(themes::table
            .find(id)
            .select(ThemeRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn find_active(&self) -> Result<Option<Theme>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(themes::table
            .filter(themes::is_active.eq(true))
            .select(ThemeRow::as_select())
            .order(themes::updated_at.desc())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn list(&self) -> Result<Vec<Theme>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(themes::table
            .select(ThemeRow::as_select())
            .order(themes::created_at.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn update(&self, theme: &Theme) -> Result<Theme, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ThemeRow = diesel::update(themes::table.find(theme.id))
            .set(&ThemeChangeset::from(theme))
            .returning(ThemeRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(themes::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
