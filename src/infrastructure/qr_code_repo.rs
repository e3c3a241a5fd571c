use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::QrCodeRepository;
use crate::domain::qr_code::QrCode;
use crate::models::qr_code::QrCodeRow;
use crate::schema::qr_codes;

use super::insert_failed;

pub struct DieselQrCodeRepository {
    pool: DbPool,
}

impl DieselQrCodeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl QrCodeRepository for DieselQrCodeRepository {
    fn create(&self, qr_code: &QrCode) -> Result<QrCode, DomainError> {
        let mut conn = self.pool.get()?;

        let row: QrCodeRow = diesel::insert_into(qr_codes::table)
            .values(&QrCodeRow::from(qr_code))
            .returning(QrCodeRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("qr code", e))?;

        row.try_into()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<QrCode>, DomainError> {
        let mut conn = self.pool.get()?;

        qr_codes::table
            .find(id)
            .select(QrCodeRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(QrCode::try_from)
            .transpose()
    }

    fn find_by_code(&self, code: &str) -> Result<Option<QrCode>, DomainError> {
        let mut conn = self.pool.get()?;

        qr_codes::table
            .filter(qr_codes::code.eq(code))
            .select(QrCodeRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(QrCode::try_from)
            .transpose()
    }

    fn list(&self, page: PageRequest) -> Result<ListResult<QrCode>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = qr_codes::table.count().get_result(conn)?;
            let rows = qr_codes::table
                .select(QrCodeRow::as_select())
                .order(qr_codes::created_at.desc())
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(QrCode::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
                total,
            })
        })
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(qr_codes::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
