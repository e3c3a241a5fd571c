use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::invoice::Invoice;
use crate::domain::ports::InvoiceRepository;
use crate::models::invoice::InvoiceRow;
use crate::schema::invoices;

use super::insert_failed;

pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl InvoiceRepository for DieselInvoiceRepository {
    fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        let mut conn = self.pool.get()?;

        let row: InvoiceRow = diesel::insert_into(invoices::table)
            .values(&InvoiceRow::from(invoice))
            .returning(InvoiceRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("invoice", e))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(invoices::table
            .find(id)
            .select(InvoiceRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }

    fn find_by_order(&self, order_id: Uuid) -> Result<Option<Invoice>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(invoices::table
            .filter(invoices::order_id.eq(order_id))
            .select(InvoiceRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::DieselInvoiceRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::invoice::{invoice_number, Invoice};
    use crate::domain::order::NewOrder;
    use crate::domain::ports::{InvoiceRepository, OrderRepository};
    use crate::infrastructure::test_support::setup_db;
    use crate::infrastructure::DieselOrderRepository;

    fn invoice(order_id: Uuid) -> Invoice {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Invoice {
            id,
            order_id,
            customer: json!({ "name": "Kim", "phone": "555" }),
            items: json!([{ "product_name": "Tea", "quantity": 1 }]),
            total: BigDecimal::from(3),
            invoice_number: invoice_number(now, id),
            pdf_url: None,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn one_invoice_per_order() {
        let (_container, pool) = setup_db().await;
        let order_id = DieselOrderRepository::new(pool.clone())
            .create(
                NewOrder {
                    customer_name: "Kim".to_string(),
                    customer_phone: "555".to_string(),
                    table_number: "1".to_string(),
                    notes: None,
                    total_amount: BigDecimal::from(3),
                    qr_code_id: None,
                },
                vec![],
            )
            .unwrap();
        let repo = DieselInvoiceRepository::new(pool);

        let created = repo.create(&invoice(order_id)).expect("create failed");
        let found = repo.find_by_order(order_id).unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.customer["name"], "Kim");

        let err = repo.create(&invoice(order_id)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
