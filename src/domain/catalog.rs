use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Category ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub is_active: bool,
    pub position: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub position: Option<i32>,
}

impl CategoryUpdate {
    pub fn apply_to(&self, existing: &Category) -> Category {
        let mut merged = existing.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(is_active) = self.is_active {
            merged.is_active = is_active;
        }
        if let Some(position) = self.position {
            merged.position = position;
        }
        merged
    }
}

#[derive(Debug, Clone)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<ProductWithVariations>,
}

// ── Product ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
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

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub is_available: bool,
    pub position: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub is_available: Option<bool>,
    pub position: Option<i32>,
    pub image_url: Option<String>,
}

impl ProductUpdate {
    pub fn apply_to(&self, existing: &Product) -> Product {
        let mut merged = existing.clone();
        if let Some(category_id) = self.category_id {
            merged.category_id = Some(category_id);
        }
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(description) = &self.description {
            merged.description = Some(description.clone());
        }
        if let Some(price) = &self.price {
            merged.price = price.clone();
        }
        if let Some(is_available) = self.is_available {
            merged.is_available = is_available;
        }
        if let Some(position) = self.position {
            merged.position = position;
        }
        if let Some(image_url) = &self.image_url {
            merged.image_url = Some(image_url.clone());
        }
        merged
    }
}

#[derive(Debug, Clone)]
pub struct ProductWithVariations {
    pub product: Product,
    pub variations: Vec<Variation>,
}

// ── Variation ────────────────────────────────────────────────────────────────

/// One selectable choice of a variation, e.g. "Large" for +5.00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationOption {
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variation {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variation_type: String,
    pub is_default: bool,
    pub is_available: bool,
    pub is_required: bool,
    pub options: Vec<VariationOption>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVariation {
    pub product_id: Uuid,
    pub variation_type: String,
    pub is_default: bool,
    pub is_available: bool,
    pub is_required: bool,
    pub options: Vec<VariationOption>,
}

#[derive(Debug, Clone, Default)]
pub struct VariationUpdate {
    pub variation_type: Option<String>,
    pub is_default: Option<bool>,
    pub is_available: Option<bool>,
    pub is_required: Option<bool>,
    pub options: Option<Vec<VariationOption>>,
}

impl VariationUpdate {
    pub fn apply_to(&self, existing: &Variation) -> Variation {
        let mut merged = existing.clone();
        if let Some(variation_type) = &self.variation_type {
            merged.variation_type = variation_type.clone();
        }
        if let Some(is_default) = self.is_default {
            merged.is_default = is_default;
        }
        if let Some(is_available) = self.is_available {
            merged.is_available = is_available;
        }
        if let Some(is_required) = self.is_required {
            merged.is_required = is_required;
        }
        if let Some(options) = &self.options {
            merged.options = options.clone();
        }
        merged
    }
}
