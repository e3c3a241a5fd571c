use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::theme::Theme;
use crate::schema::themes;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = themes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ThemeRow {
    pub id: Uuid,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = themes, treat_none_as_null = true)]
pub struct ThemeChangeset {
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&Theme> for ThemeRow {
    fn from(t: &Theme) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            primary_color: t.primary_color.clone(),
            secondary_color: t.secondary_color.clone(),
            font_family: t.font_family.clone(),
            logo_url: t.logo_url.clone(),
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

impl From<&Theme> for ThemeChangeset {
    fn from(t: &Theme) -> Self {
        Self {
            name: t.name.clone(),
            primary_color: t.primary_color.clone(),
            secondary_color: t.secondary_color.clone(),
            font_family: t.font_family.clone(),
            logo_url: t.logo_url.clone(),
            is_active: t.is_active,
            updated_at: t.updated_at,
        }
    }
}

impl From<ThemeRow> for Theme {
    fn from(row: ThemeRow) -> Self {
        Theme {
            id: row.id,
            name: row.name,
            primary_color: row.primary_color,
            secondary_color: row.secondary_color,
            font_family: row.font_family,
            logo_url: row.logo_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
