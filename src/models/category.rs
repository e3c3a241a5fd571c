use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::Category;
use crate::schema::categories;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = categories)]
pub struct CategoryChangeset {
    pub name: String,
    pub is_active: bool,
    pub position: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            is_active: c.is_active,
            position: c.position,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<&Category> for CategoryChangeset {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            is_active: c.is_active,
            position: c.position,
            updated_at: c.updated_at,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            is_active: row.is_active,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
