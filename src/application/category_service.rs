use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::guards;
use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::catalog::{Category, CategoryUpdate, CategoryWithProducts, NewCategory};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::{CategoryRepository, ProductRepository};

const SOURCE: &str = "category_service";

pub struct CategoryService<C, P> {
    categories: C,
    products: P,
    activity: Arc<dyn ActivityLogger>,
}

impl<C: CategoryRepository, P: ProductRepository> CategoryService<C, P> {
    pub fn new(categories: C, products: P, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            categories,
            products,
            activity,
        }
    }

    /// Names are unique ignoring case; `except` skips the category being renamed.
    fn ensure_name_free(&self, name: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        match self.categories.find_by_name(name)? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::invalid(format!(
                "category '{}' already exists",
                existing.name
            ))),
            _ => Ok(()),
        }
    }

    pub fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::invalid("category name must not be empty"));
        }
        self.ensure_name_free(&name, None)?;

        let now = Utc::now();
        let category = self.categories.create(&Category {
            id: Uuid::new_v4(),
            name,
            is_active: input.is_active,
            position: input.position,
            created_at: now,
            updated_at: now,
        })?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "category.created").on("category", category.id));
        Ok(category)
    }

    pub fn get_category(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub fn get_category_with_products(&self, id: Uuid) -> Result<CategoryWithProducts, DomainError> {
        self.categories
            .find_with_products(id)?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub fn list_categories(&self, page: PageRequest) -> Result<ListResult<Category>, DomainError> {
        self.categories.list(page)
    }

    pub fn list_categories_with_products(
        &self,
        page: PageRequest,
    ) -> Result<ListResult<CategoryWithProducts>, DomainError> {
        self.categories.list_with_products(page)
    }

    pub fn update_category(&self, id: Uuid, update: CategoryUpdate) -> Result<Category, DomainError> {
        let existing = self.get_category(id)?;

        let mut update = update;
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::invalid("category name must not be empty"));
            }
            self.ensure_name_free(name, Some(id))?;
        }

        let mut merged = update.apply_to(&existing);
        merged.updated_at = Utc::now();
        let saved = self.categories.update(&merged)?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "category.updated").on("category", id));
        Ok(saved)
    }

    pub fn delete_category(&self, id: Uuid) -> Result<(), DomainError> {
        self.get_category(id)?;
        guards::ensure_category_has_no_products(&self.products, id)?;

        if !self.categories.delete(id)? {
            return Err(DomainError::not_found("Category", id));
        }

        self.activity
            .record(ActivityEvent::info(SOURCE, "category.deleted").on("category", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;
    use crate::application::test_support::{InMemoryCatalog, RecordingLogger};
    use crate::domain::catalog::Product;

    fn service() -> (CategoryService<InMemoryCatalog, InMemoryCatalog>, InMemoryCatalog, RecordingLogger) {
        let catalog = InMemoryCatalog::default();
        let logger = RecordingLogger::default();
        let service = CategoryService::new(catalog.clone(), catalog.clone(), Arc::new(logger.clone()));
        (service, catalog, logger)
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            is_active: true,
            position: 0,
        }
    }

    #[test]
    fn duplicate_name_is_rejected_ignoring_case() {
        let (service, _, _) = service();
        service.create_category(new_category("Drinks")).unwrap();

        let err = service.create_category(new_category("  DRINKS ")).unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("already exists")));
    }

    #[test]
    fn rename_to_own_name_is_allowed() {
        let (service, _, _) = service();
        let drinks = service.create_category(new_category("Drinks")).unwrap();

        let renamed = service
            .update_category(
                drinks.id,
                CategoryUpdate {
                    name: Some("drinks".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(renamed.name, "drinks");
    }

    #[test]
    fn delete_is_blocked_while_products_remain() {
        let (service, catalog, _) = service();
        let mains = service.create_category(new_category("Mains")).unwrap();
        let now = Utc::now();
        ProductRepository::create(
            &catalog,
            &Product {
                id: Uuid::new_v4(),
                category_id: Some(mains.id),
                name: "Curry".to_string(),
                description: None,
                price: BigDecimal::from(11),
                is_available: true,
                position: 0,
                image_url: None,
                created_at: now,
                updated_at: now,
            },
        )
        .unwrap();

        let err = service.delete_category(mains.id).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("1 product(s)")));
        assert!(service.get_category(mains.id).is_ok());
    }

    #[test]
    fn empty_category_is_deleted_and_logged() {
        let (service, _, logger) = service();
        let sides = service.create_category(new_category("Sides")).unwrap();

        service.delete_category(sides.id).unwrap();

        assert!(matches!(
            service.get_category(sides.id),
            Err(DomainError::NotFound(_))
        ));
        assert_eq!(logger.actions(), vec!["category.created", "category.deleted"]);
    }

    #[test]
    fn blank_name_is_invalid() {
        let (service, _, _) = service();
        assert!(matches!(
            service.create_category(new_category("   ")),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
