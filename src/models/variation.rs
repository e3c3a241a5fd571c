use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::catalog::{Variation, VariationOption};
use crate::domain::errors::DomainError;
use crate::schema::variations;

use super::product::ProductRow;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = variations)]
#[diesel(belongs_to(ProductRow, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VariationRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variation_type: String,
    pub is_default: bool,
    pub is_available: bool,
    pub is_required: bool,
    pub options: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = variations)]
pub struct VariationChangeset {
    pub product_id: Uuid,
    pub variation_type: String,
    pub is_default: bool,
    pub is_available: bool,
    pub is_required: bool,
    pub options: Value,
    pub updated_at: DateTime<Utc>,
}

fn options_to_json(options: &[VariationOption]) -> Result<Value, DomainError> {
    serde_json::to_value(options)
        .map_err(|e| DomainError::Internal(format!("cannot encode variation options: {}", e)))
}

impl TryFrom<&Variation> for VariationRow {
    type Error = DomainError;

    fn try_from(v: &Variation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: v.id,
            product_id: v.product_id,
            variation_type: v.variation_type.clone(),
            is_default: v.is_default,
            is_available: v.is_available,
            is_required: v.is_required,
            options: options_to_json(&v.options)?,
            created_at: v.created_at,
            updated_at: v.updated_at,
        })
    }
}

impl TryFrom<&Variation> for VariationChangeset {
    type Error = DomainError;

    fn try_from(v: &Variation) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: v.product_id,
            variation_type: v.variation_type.clone(),
            is_default: v.is_default,
            is_available: v.is_available,
            is_required: v.is_required,
            options: options_to_json(&v.options)?,
            updated_at: v.updated_at,
        })
    }
}

impl TryFrom<VariationRow> for Variation {
    type Error = DomainError;

    fn try_from(row: VariationRow) -> Result<Self, Self::Error> {
        let options: Vec<VariationOption> = serde_json::from_value(row.options).map_err(|e| {
            DomainError::Internal(format!("variation {} has malformed options: {}", row.id, e))
        })?;
        Ok(Variation {
            id: row.id,
            product_id: row.product_id,
            variation_type: row.variation_type,
            is_default: row.is_default,
            is_available: row.is_available,
            is_required: row.is_required,
            options,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
