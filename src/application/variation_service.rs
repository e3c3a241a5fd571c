use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::catalog::{NewVariation, Variation, VariationOption, VariationUpdate};
use crate::domain::errors::DomainError;
use crate::domain::money;
use crate::domain::ports::{ProductRepository, VariationRepository};

const SOURCE: &str = "variation_service";

pub struct VariationService<V, P> {
    variations: V,
    products: P,
    activity: Arc<dyn ActivityLogger>,
}

fn validate_options(options: &[VariationOption]) -> Result<(), DomainError> {
    if options.is_empty() {
        return Err(DomainError::invalid("a variation needs at least one option"));
    }
    for option in options {
        if option.name.trim().is_empty() {
            return Err(DomainError::invalid("option name must not be empty"));
        }
        if option.price < BigDecimal::zero() {
            return Err(DomainError::invalid(format!(
                "option '{}' has a negative price",
                option.name
            )));
        }
        money::ensure_storable(&option.price, &format!("option '{}' price", option.name))?;
    }
    Ok(())
}

impl<V: VariationRepository, P: ProductRepository> VariationService<V, P> {
    pub fn new(variations: V, products: P, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            variations,
            products,
            activity,
        }
    }

    pub fn create_variation(&self, input: NewVariation) -> Result<Variation, DomainError> {
        if input.variation_type.trim().is_empty() {
            return Err(DomainError::invalid("variation type must not be empty"));
        }
        validate_options(&input.options)?;
        if self.products.find_by_id(input.product_id)?.is_none() {
            return Err(DomainError::invalid(format!(
                "product {} does not exist",
                input.product_id
            )));
        }

        let now = Utc::now();
        let variation = self.variations.create(&Variation {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            variation_type: input.variation_type.trim().to_string(),
            is_default: input.is_default,
            is_available: input.is_available,
            is_required: input.is_required,
            options: input.options,
            created_at: now,
            updated_at: now,
        })?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "variation.created").on("variation", variation.id),
        );
        Ok(variation)
    }

    pub fn get_variation(&self, id: Uuid) -> Result<Variation, DomainError> {
        self.variations
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Variation", id))
    }

    pub fn list_for_product(&self, product_id: Uuid) -> Result<Vec<Variation>, DomainError> {
        if self.products.find_by_id(product_id)?.is_none() {
            return Err(DomainError::not_found("Product", product_id));
        }
        self.variations.list_by_product(product_id)
    }

    pub fn update_variation(&self, id: Uuid, update: VariationUpdate) -> Result<Variation, DomainError> {
        let existing = self.get_variation(id)?;

        if let Some(options) = &update.options {
            validate_options(options)?;
        }
        if let Some(kind) = &update.variation_type {
            if kind.trim().is_empty() {
                return Err(DomainError::invalid("variation type must not be empty"));
            }
        }

        let mut merged = update.apply_to(&existing);
        merged.updated_at = Utc::now();
        let saved = self.variations.update(&merged)?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "variation.updated").on("variation", id));
        Ok(saved)
    }

    pub fn delete_variation(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.variations.delete(id)? {
            return Err(DomainError::not_found("Variation", id));
        }
        self.activity
            .record(ActivityEvent::info(SOURCE, "variation.deleted").on("variation", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{InMemoryCatalog, RecordingLogger};
    use crate::domain::catalog::Product;

    fn setup() -> (VariationService<InMemoryCatalog, InMemoryCatalog>, Uuid) {
        let catalog = InMemoryCatalog::default();
        let now = Utc::now();
        let product = ProductRepository::create(
            &catalog,
            &Product {
                id: Uuid::new_v4(),
                category_id: None,
                name: "Burger".to_string(),
                description: None,
                price: BigDecimal::from(8),
                is_available: true,
                position: 0,
                image_url: None,
                created_at: now,
                updated_at: now,
            },
        )
        .unwrap();
        let service = VariationService::new(
            catalog.clone(),
            catalog,
            Arc::new(RecordingLogger::default()),
        );
        (service, product.id)
    }

    fn input(product_id: Uuid, options: Vec<VariationOption>) -> NewVariation {
        NewVariation {
            product_id,
            variation_type: "doneness".to_string(),
            is_default: false,
            is_available: true,
            is_required: true,
            options,
        }
    }

    fn option(name: &str, price: i32) -> VariationOption {
        VariationOption {
            name: name.to_string(),
            price: BigDecimal::from(price),
        }
    }

    #[test]
    fn creation_requires_an_option() {
        let (service, product_id) = setup();
        assert!(matches!(
            service.create_variation(input(product_id, vec![])),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn option_prices_must_fit_the_money_column() {
        let (service, product_id) = setup();
        let oversized = VariationOption {
            name: "Gold leaf".to_string(),
            price: "1e20".parse().unwrap(),
        };

        assert!(matches!(
            service.create_variation(input(product_id, vec![oversized])),
            Err(DomainError::InvalidInput(msg)) if msg.contains("Gold leaf")
        ));
    }

    #[test]
    fn update_without_options_keeps_existing_ones() {
        let (service, product_id) = setup();
        let created = service
            .create_variation(input(product_id, vec![option("Medium", 0), option("Well done", 1)]))
            .unwrap();

        let updated = service
            .update_variation(
                created.id,
                VariationUpdate {
                    is_required: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.options.len(), 2);
        assert!(!updated.is_required);
        assert_eq!(service.list_for_product(product_id).unwrap().len(), 1);
    }

    #[test]
    fn unknown_product_is_rejected() {
        let (service, _) = setup();
        assert!(service
            .create_variation(input(Uuid::new_v4(), vec![option("Rare", 0)]))
            .is_err());
        assert!(matches!(
            service.list_for_product(Uuid::new_v4()),
            Err(DomainError::NotFound(_))
        ));
    }
}
