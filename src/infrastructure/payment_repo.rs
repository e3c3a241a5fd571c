use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::payment::Payment;
use crate::domain::ports::PaymentRepository;
use crate::models::payment::{PaymentChangeset, PaymentRow};
use crate::schema::payments;

use super::insert_failed;

pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PaymentRepository for DieselPaymentRepository {
    fn create(&self, payment: &Payment) -> Result<Payment, DomainError> {
        let mut conn = self.pool.get()?;

        let row: PaymentRow = diesel::insert_into(payments::table)
            .values(&PaymentRow::from(payment))
            .returning(PaymentRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| insert_failed("payment", e))?;

        row.try_into()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        let mut conn = self.pool.get()?;

        payments::table
            .find(id)
            .select(PaymentRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Payment::try_from)
            .transpose()
    }

    fn list_by_order(&self, order_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        let mut conn = self.pool.get()?;

        payments::table
            .filter(payments::order_id.eq(order_id))
            .select(PaymentRow::as_select())
            .order(payments::created_at.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }

    fn update(&self, payment: &Payment) -> Result<Payment, DomainError> {
        let mut conn = self.pool.get()?;

        let row: PaymentRow = diesel::update(payments::table.find(payment.id))
            .set(&PaymentChangeset::from(payment))
            .returning(PaymentRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::DieselPaymentRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::order::NewOrder;
    use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
    use crate::domain::ports::{OrderRepository, PaymentRepository};
    use crate::infrastructure::test_support::setup_db;
    use crate::infrastructure::DieselOrderRepository;

    fn payment(order_id: Uuid) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            order_id,
            method: PaymentMethod::Card,
            amount: BigDecimal::from_str("42.50").unwrap(),
            status: PaymentStatus::Pending,
            transaction_ref: Some("txn-001".to_string()),
            paid_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn payments_attach_to_orders() {
        let (_container, pool) = setup_db().await;
        let order_id = DieselOrderRepository::new(pool.clone())
            .create(
                NewOrder {
                    customer_name: "Lee".to_string(),
                    customer_phone: "555".to_string(),
                    table_number: "12".to_string(),
                    notes: None,
                    total_amount: BigDecimal::from_str("42.50").unwrap(),
                    qr_code_id: None,
                },
                vec![],
            )
            .unwrap();
        let repo = DieselPaymentRepository::new(pool);

        let mut created = repo.create(&payment(order_id)).expect("create failed");
        assert_eq!(created.method, PaymentMethod::Card);

        created.status = PaymentStatus::Success;
        created.paid_at = Some(Utc::now());
        let saved = repo.update(&created).expect("update failed");
        assert_eq!(saved.status, PaymentStatus::Success);
        assert!(saved.paid_at.is_some());

        assert_eq!(repo.list_by_order(order_id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn payment_for_missing_order_is_invalid_input() {
        let (_container, pool) = setup_db().await;
        let repo = DieselPaymentRepository::new(pool);

        let err = repo.create(&payment(Uuid::new_v4())).unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
