use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::schema::products;

use super::category::CategoryRow;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = products)]
#[diesel(belongs_to(CategoryRow, foreign_key = category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub is_available: bool,
    pub position: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products, treat_none_as_null = true)]
pub struct ProductChangeset {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub is_available: bool,
    pub position: i32,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price.clone(),
            is_available: p.is_available,
            position: p.position,
            image_url: p.image_url.clone(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<&Product> for ProductChangeset {
    fn from(p: &Product) -> Self {
        Self {
            category_id: p.category_id,
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price.clone(),
            is_available: p.is_available,
            position: p.position,
            image_url: p.image_url.clone(),
            updated_at: p.updated_at,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            price: row.price,
            is_available: row.is_available,
            position: row.position,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
