//! Referential checks run before deletes. Calling a repository's `delete`
//! directly skips them.

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{ProductRepository, VariationRepository};

pub fn ensure_category_has_no_products<P: ProductRepository>(
    products: &P,
    category_id: Uuid,
) -> Result<(), DomainError> {
    match products.count_by_category(category_id)? {
        0 => Ok(()),
        n => Err(DomainError::invalid(format!(
            "category still has {} product(s)",
            n
        ))),
    }
}

pub fn ensure_product_has_no_variations<V: VariationRepository>(
    variations: &V,
    product_id: Uuid,
) -> Result<(), DomainError> {
    match variations.count_by_product(product_id)? {
        0 => Ok(()),
        n => Err(DomainError::invalid(format!(
            "product still has {} variation(s)",
            n
        ))),
    }
}
