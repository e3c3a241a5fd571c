use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::money;
use crate::domain::payment::{NewPayment, Payment, PaymentStatus};
use crate::domain::ports::{OrderRepository, PaymentRepository};

const SOURCE: &str = "payment_service";

pub struct PaymentService<P, O> {
    payments: P,
    orders: O,
    activity: Arc<dyn ActivityLogger>,
}

impl<P: PaymentRepository, O: OrderRepository> PaymentService<P, O> {
    pub fn new(payments: P, orders: O, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            payments,
            orders,
            activity,
        }
    }

    fn ensure_order(&self, order_id: Uuid) -> Result<(), DomainError> {
        match self.orders.find_by_id(order_id)? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Order", order_id)),
        }
    }

    pub fn record_payment(&self, input: NewPayment) -> Result<Payment, DomainError> {
        self.ensure_order(input.order_id)?;
        if input.amount <= BigDecimal::zero() {
            return Err(DomainError::invalid("amount must be greater than zero"));
        }
        money::ensure_storable(&input.amount, "amount")?;

        let now = Utc::now();
        let payment = self.payments.create(&Payment {
            id: Uuid::new_v4(),
            order_id: input.order_id,
            method: input.method,
            amount: input.amount,
            status: input.status,
            transaction_ref: input.transaction_ref,
            paid_at: (input.status == PaymentStatus::Success).then_some(now),
            created_at: now,
        })?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "payment.recorded")
                .on("payment", payment.id)
                .with_metadata(json!({
                    "order_id": payment.order_id,
                    "method": payment.method.as_str(),
                    "status": payment.status.as_str(),
                })),
        );
        Ok(payment)
    }

    pub fn get_payment(&self, id: Uuid) -> Result<Payment, DomainError> {
        self.payments
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Payment", id))
    }

    pub fn list_for_order(&self, order_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        self.ensure_order(order_id)?;
        self.payments.list_by_order(order_id)
    }

    pub fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment, DomainError> {
        let mut payment = self.get_payment(id)?;
        payment.status = status;
        if status == PaymentStatus::Success && payment.paid_at.is_none() {
            payment.paid_at = Some(Utc::now());
        }
        let saved = self.payments.update(&payment)?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "payment.status_changed")
                .on("payment", id)
                .with_metadata(json!({ "to": status.as_str() })),
        );
        Ok(saved)
    }
}
