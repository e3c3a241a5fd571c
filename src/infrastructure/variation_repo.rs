use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::Variation;
use crate::domain::errors::DomainError;
use crate::domain::ports::VariationRepository;
use crate::models::variation::{VariationChangeset, VariationRow};
use crate::schema::variations;

use super::insert_failed;

pub struct DieselVariationRepository {
    pool: DbPool,
}

impl DieselVariationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl VariationRepository for DieselVariationRepository {
    fn create(&self, variation: &Variation) -> Result<Variation, DomainError> {
        let mut conn = self.pool.get()?;

        let row: VariationRow = diesel::insert_into(variations::table)
            .values(&VariationRow::try_from(variation)?)
            .returning(VariationRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("variation", e))?;

        row.try_into()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Variation>, DomainError> {
        let mut conn = self.pool.get()?;

        variations::table
            .find(id)
            .select(VariationRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Variation::try_from)
            .transpose()
    }

    fn list_by_product(&self, product_id: Uuid) -> Result<Vec<Variation>, DomainError> {
        let mut conn = self.pool.get()?;

        variations::table
            .filter(variations::product_id.eq(product_id))
            .select(VariationRow::as_select())
            .order(variations::created_at.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Variation::try_from)
            .collect()
    }

    fn update(&self, variation: &Variation) -> Result<Variation, DomainError> {
        let mut conn = self.pool.get()?;

        let row: VariationRow = diesel::update(variations::table.find(variation.id))
            .set(&VariationChangeset::try_from(variation)?)
            .returning(VariationRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(variations::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }

    fn count_by_product(&self, product_id: Uuid) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(variations::table
            .filter(variations::product_id.eq(product_id))
            .count()
            .get_result(&mut conn)?)
    }
}
