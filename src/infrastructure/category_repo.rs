use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sql_types::Text;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{Category, CategoryWithProducts, Product, ProductWithVariations, Variation};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::CategoryRepository;
use crate::models::category::{CategoryChangeset, CategoryRow};
use crate::models::product::ProductRow;
use crate::models::variation::VariationRow;
use crate::schema::{categories, products, variations};

use super::insert_failed;

diesel::define_sql_function!(fn lower(x: Text) -> Text);

pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Loads products and their variations for a batch of categories, keeping
/// the input order.
fn attach_products(
    conn: &mut PgConnection,
    cats: Vec<CategoryRow>,
) -> Result<Vec<CategoryWithProducts>, DomainError> {
    let product_rows = ProductRow::belonging_to(&cats)
        .select(ProductRow::as_select())
        .order((products::position.asc(), products::name.asc()))
        .load(conn)?;

    let mut by_product: HashMap<Uuid, Vec<Variation>> = HashMap::new();
    for row in VariationRow::belonging_to(&product_rows)
        .select(VariationRow::as_select())
        .order(variations::created_at.asc())
        .load(conn)?
    {
        by_product
            .entry(row.product_id)
            .or_default()
            .push(Variation::try_from(row)?);
    }

    Ok(product_rows
        .grouped_by(&cats)
        .into_iter()
        .zip(cats)
        .map(|(products, category)| CategoryWithProducts {
            category: category.into(),
            products: products
                .into_iter()
                .map(|p| ProductWithVariations {
                    variations: by_product.remove(&p.id).unwrap_or_default(),
                    product: Product::from(p),
                })
                .collect(),
        })
        .collect())
}

impl CategoryRepository for DieselCategoryRepository {
    fn create(&self, category: &Category) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;

        let row: CategoryRow = diesel::insert_into(categories::table)
            .values(&CategoryRow::from(category))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("category", e))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn find_with_products(&self, id: Uuid) -> Result<Option<CategoryWithProducts>, DomainError> {
        let mut conn = self.pool.get()?;

        let Some(row) = categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        Ok(attach_products(&mut conn, vec![row])?.pop())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(categories::table
            .filter(lower(categories::name).eq(name.trim().to_lowercase()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn list(&self, page: PageRequest) -> Result<ListResult<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = categories::table.count().get_result(conn)?;
            let rows = categories::table
                .select(CategoryRow::as_select())
                .order((categories::position.asc(), categories::name.asc()))
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: rows.into_iter().map(Into::into).collect(),
                total,
            })
        })
    }

    fn list_with_products(
        &self,
        page: PageRequest,
    ) -> Result<ListResult<CategoryWithProducts>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = categories::table.count().get_result(conn)?;
            let rows = categories::table
                .select(CategoryRow::as_select())
                .order((categories::position.asc(), categories::name.asc()))
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: attach_products(conn, rows)?,
                total,
            })
        })
    }

    fn update(&self, category: &Category) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;

        let row: CategoryRow = diesel::update(categories::table.find(category.id))
            .set(&CategoryChangeset::from(category))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(categories::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::DieselCategoryRepository;
    use crate::domain::catalog::{Category, Product, Variation, VariationOption};
    use crate::domain::pagination::PageRequest;
    use crate::domain::ports::{CategoryRepository, ProductRepository, VariationRepository};
    use crate::infrastructure::test_support::setup_db;
    use crate::infrastructure::{DieselProductRepository, DieselVariationRepository};

    fn category(name: &str, position: i32) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_active: true,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    fn product(category_id: Uuid, name: &str) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            category_id: Some(category_id),
            name: name.to_string(),
            description: None,
            price: BigDecimal::from(12),
            is_available: true,
            position: 0,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn find_by_name_ignores_case() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCategoryRepository::new(pool);
        let created = repo.create(&category("Drinks", 1)).expect("create failed");

        let found = repo
            .find_by_name("dRiNkS")
            .expect("lookup failed")
            .expect("category should be found");

        assert_eq!(found.id, created.id);
        assert!(repo.find_by_name("Desserts").unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_name_treats_wildcards_literally() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCategoryRepository::new(pool);
        repo.create(&category("Hot Drinks", 1)).expect("create failed");

        assert!(repo.find_by_name("Hot_Drinks").unwrap().is_none());
        assert!(repo.find_by_name("H%").unwrap().is_none());
        assert!(repo.find_by_name("  hot drinks ").unwrap().is_some());
    }

    #[tokio::test]
    async fn list_with_products_nests_variations() {
        let (_container, pool) = setup_db().await;
        let categories = DieselCategoryRepository::new(pool.clone());
        let products = DieselProductRepository::new(pool.clone());
        let variations = DieselVariationRepository::new(pool);

        let mains = categories.create(&category("Mains", 1)).unwrap();
        let _empty = categories.create(&category("Specials", 2)).unwrap();
        let ramen = products.create(&product(mains.id, "Ramen")).unwrap();
        let now = Utc::now();
        variations
            .create(&Variation {
                id: Uuid::new_v4(),
                product_id: ramen.id,
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
            })
            .unwrap();

        let listed = categories
            .list_with_products(PageRequest::default())
            .expect("list failed");

        assert_eq!(listed.total, 2);
        assert_eq!(listed.items[0].category.name, "Mains");
        assert_eq!(listed.items[0].products.len(), 1);
        assert_eq!(listed.items[0].products[0].variations.len(), 1);
        assert_eq!(listed.items[0].products[0].variations[0].options[0].name, "Large");
        assert!(listed.items[1].products.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCategoryRepository::new(pool);
        let mut created = repo.create(&category("Soups", 4)).unwrap();

        created.is_active = false;
        let saved = repo.update(&created).expect("update failed");
        assert!(!saved.is_active);
        assert_eq!(saved.name, "Soups");

        assert!(repo.delete(created.id).unwrap());
        assert!(repo.find_by_id(created.id).unwrap().is_none());
    }
}
