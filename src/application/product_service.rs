use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use uuid::Uuid;

use super::guards;
use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::catalog::{NewProduct, Product, ProductUpdate};
use crate::domain::errors::DomainError;
use crate::domain::money;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::{CategoryRepository, ProductRepository, VariationRepository};

const SOURCE: &str = "product_service";

pub struct ProductService<P, C, V> {
    products: P,
    categories: C,
    variations: V,
    activity: Arc<dyn ActivityLogger>,
}

fn validate_price(price: &BigDecimal) -> Result<(), DomainError> {
    if price < &BigDecimal::zero() {
        return Err(DomainError::invalid("price must not be negative"));
    }
    money::ensure_storable(price, "price")
}

impl<P, C, V> ProductService<P, C, V>
where
    P: ProductRepository,
    C: CategoryRepository,
    V: VariationRepository,
{
    pub fn new(products: P, categories: C, variations: V, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            products,
            categories,
            variations,
            activity,
        }
    }

    fn ensure_category_exists(&self, category_id: Option<Uuid>) -> Result<(), DomainError> {
        if let Some(id) = category_id {
            if self.categories.find_by_id(id)?.is_none() {
                return Err(DomainError::invalid(format!("category {} does not exist", id)));
            }
        }
        Ok(())
    }

    pub fn create_product(&self, input: NewProduct) -> Result<Product, DomainError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::invalid("product name must not be empty"));
        }
        validate_price(&input.price)?;
        self.ensure_category_exists(input.category_id)?;

        let now = Utc::now();
        let product = self.products.create(&Product {
            id: Uuid::new_v4(),
            category_id: input.category_id,
            name,
            description: input.description,
            price: input.price,
            is_available: input.is_available,
            position: input.position,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        })?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "product.created").on("product", product.id));
        Ok(product)
    }

    pub fn get_product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.products
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    pub fn list_products(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<ListResult<Product>, DomainError> {
        self.products.list(category_id, page)
    }

    pub fn update_product(
        &self,
        id: Uuid,
        mut update: ProductUpdate,
    ) -> Result<Product, DomainError> {
        let existing = self.get_product(id)?;

        if let Some(name) = update.name.take() {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::invalid("product name must not be empty"));
            }
            update.name = Some(name);
        }
        if let Some(price) = &update.price {
            validate_price(price)?;
        }
        self.ensure_category_exists(update.category_id)?;

        let mut merged = update.apply_to(&existing);
        merged.updated_at = Utc::now();
        let saved = self.products.update(&merged)?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "product.updated").on("product", id));
        Ok(saved)
    }

    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.get_product(id)?;
        guards::ensure_product_has_no_variations(&self.variations, id)?;

        if !self.products.delete(id)? {
            return Err(DomainError::not_found("Product", id));
        }

        self.activity
            .record(ActivityEvent::info(SOURCE, "product.deleted").on("product", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::application::test_support::{InMemoryCatalog, RecordingLogger};
    use crate::domain::catalog::{Variation, VariationOption};

    type Service = ProductService<InMemoryCatalog, InMemoryCatalog, InMemoryCatalog>;

    fn service() -> (Service, InMemoryCatalog) {
        let catalog = InMemoryCatalog::default();
        let service = ProductService::new(
            catalog.clone(),
            catalog.clone(),
            catalog.clone(),
            Arc::new(RecordingLogger::default()),
        );
        (service, catalog)
    }

    fn new_product(name: &str, price: &str) -> NewProduct {
        NewProduct {
            category_id: None,
            name: name.to_string(),
            description: Some("chef's pick".to_string()),
            price: BigDecimal::from_str(price).unwrap(),
            is_available: true,
            position: 2,
            image_url: None,
        }
    }

    #[test]
    fn partial_update_keeps_untouched_fields() {
        let (service, _) = service();
        let created = service.create_product(new_product("A", "10")).unwrap();

        let updated = service
            .update_product(
                created.id,
                ProductUpdate {
                    price: Some(BigDecimal::from(15)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.price, BigDecimal::from(15));
        assert_eq!(updated.description.as_deref(), Some("chef's pick"));
        assert_eq!(updated.position, 2);
    }

    #[test]
    fn negative_price_is_rejected() {
        let (service, _) = service();
        assert!(matches!(
            service.create_product(new_product("Refund", "-1")),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn prices_must_fit_the_money_column() {
        let (service, _) = service();
        assert!(matches!(
            service.create_product(new_product("Caviar", "1e20")),
            Err(DomainError::InvalidInput(msg)) if msg.starts_with("price")
        ));
        assert!(service.create_product(new_product("Tea", "2.125")).is_err());

        let tea = service.create_product(new_product("Tea", "2.50")).unwrap();
        assert!(matches!(
            service.update_product(
                tea.id,
                ProductUpdate {
                    price: Some(BigDecimal::from_str("10000000000").unwrap()),
                    ..Default::default()
                },
            ),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn update_trims_the_name() {
        let (service, _) = service();
        let created = service.create_product(new_product("Soup", "4")).unwrap();

        let updated = service
            .update_product(
                created.id,
                ProductUpdate {
                    name: Some("  Miso Soup ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Miso Soup");
        assert!(service
            .update_product(
                created.id,
                ProductUpdate {
                    name: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .is_err());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let (service, _) = service();
        let mut input = new_product("Orphan", "3");
        input.category_id = Some(Uuid::new_v4());

        assert!(matches!(
            service.create_product(input),
            Err(DomainError::InvalidInput(msg)) if msg.contains("does not exist")
        ));
    }

    #[test]
    fn delete_is_blocked_by_variations() {
        let (service, catalog) = service();
        let pizza = service.create_product(new_product("Pizza", "9")).unwrap();
        let now = Utc::now();
        VariationRepository::create(
            &catalog,
            &Variation {
                id: Uuid::new_v4(),
                product_id: pizza.id,
                variation_type: "size".to_string(),
                is_default: true,
                is_available: true,
                is_required: true,
                options: vec![VariationOption {
                    name: "Large".to_string(),
                    price: BigDecimal::from(3),
                }],
                created_at: now,
                updated_at: now,
            },
        )
        .unwrap();

        let err = service.delete_product(pizza.id).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("1 variation(s)")));

        let plain = service.create_product(new_product("Bread", "2")).unwrap();
        assert!(service.delete_product(plain.id).is_ok());
    }

    #[test]
    fn missing_product_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.get_product(Uuid::new_v4()),
            Err(DomainError::NotFound(_))
        ));
    }
}
