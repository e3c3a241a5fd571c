use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::ProductRepository;
use crate::models::product::{ProductChangeset, ProductRow};
use crate::schema::products;

use super::insert_failed;

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, product: &Product) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&ProductRow::from(product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("product", e))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn list(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<ListResult<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut count_query = products::table.into_boxed();
            let mut rows_query = products::table.select(ProductRow::as_select()).into_boxed();

            if let Some(category_id) = category_id {
                count_query = count_query.filter(products::category_id.eq(category_id));
                rows_query = rows_query.filter(products::category_id.eq(category_id));
            }

            let total: i64 = count_query.count().get_result(conn)?;
            let rows = rows_query
                .order((products::position.asc(), products::name.asc()))
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: rows.into_iter().map(Into::into).collect(),
                total,
            })
        })
    }

    fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::update(products::table.find(product.id))
            .set(&ProductChangeset::from(product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }

    fn count_by_category(&self, category_id: Uuid) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(products::table
            .filter(products::category_id.eq(category_id))
            .count()
            .get_result(&mut conn)?)
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::DieselProductRepository;
    use crate::domain::catalog::{Category, Product};
    use crate::domain::errors::DomainError;
    use crate::domain::pagination::PageRequest;
    use crate::domain::ports::{CategoryRepository, ProductRepository};
    use crate::infrastructure::test_support::setup_db;
    use crate::infrastructure::DieselCategoryRepository;

    fn product(category_id: Option<Uuid>, name: &str) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            category_id,
            name: name.to_string(),
            description: Some("broth".to_string()),
            price: BigDecimal::from(10),
            is_available: true,
            position: 0,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn seed_category(pool: &crate::db::DbPool) -> Category {
        let now = Utc::now();
        DieselCategoryRepository::new(pool.clone())
            .create(&Category {
                id: Uuid::new_v4(),
                name: "Noodles".to_string(),
                is_active: true,
                position: 0,
                created_at: now,
                updated_at: now,
            })
            .expect("seed category")
    }

    #[tokio::test]
    async fn list_filters_by_category_and_counts() {
        let (_container, pool) = setup_db().await;
        let category = seed_category(&pool);
        let repo = DieselProductRepository::new(pool);

        repo.create(&product(Some(category.id), "Udon")).unwrap();
        repo.create(&product(Some(category.id), "Soba")).unwrap();
        repo.create(&product(None, "Water")).unwrap();

        let in_category = repo
            .list(Some(category.id), PageRequest::default())
            .expect("list failed");
        assert_eq!(in_category.total, 2);
        assert_eq!(repo.count_by_category(category.id).unwrap(), 2);

        let all = repo.list(None, PageRequest::default()).unwrap();
        assert_eq!(all.total, 3);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_as_invalid_input() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let err = repo
            .create(&product(Some(Uuid::new_v4()), "Ghost"))
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_can_clear_optional_fields() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        let mut created = repo.create(&product(None, "Gyoza")).unwrap();

        created.description = None;
        created.price = BigDecimal::from(15);
        let saved = repo.update(&created).expect("update failed");

        assert!(saved.description.is_none());
        assert_eq!(saved.price, BigDecimal::from(15));
    }
}
