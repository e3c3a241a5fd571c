use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::invoice::{invoice_number, Invoice};
use crate::domain::order::OrderView;
use crate::domain::ports::{InvoiceRepository, OrderRepository};

const SOURCE: &str = "invoice_service";

pub struct InvoiceService<I, O> {
    invoices: I,
    orders: O,
    activity: Arc<dyn ActivityLogger>,
}

fn customer_snapshot(view: &OrderView) -> Value {
    json!({
        "name": view.order.customer_name,
        "phone": view.order.customer_phone,
        "table_number": view.order.table_number,
    })
}

fn items_snapshot(view: &OrderView) -> Value {
    Value::Array(
        view.details
            .iter()
            .map(|line| {
                let d = &line.detail;
                json!({
                    "product_name": d.product_name,
                    "variation_name": d.variation_name,
                    "unit_price": d.unit_price.to_string(),
                    "quantity": d.quantity,
                    "total_price": d.total_price.to_string(),
                })
            })
            .collect(),
    )
}

impl<I: InvoiceRepository, O: OrderRepository> InvoiceService<I, O> {
    pub fn new(invoices: I, orders: O, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            invoices,
            orders,
            activity,
        }
    }

    /// Snapshots the order's customer and lines into a new invoice.
    /// An order gets at most one invoice.
    pub fn issue_invoice(&self, order_id: Uuid, pdf_url: Option<String>) -> Result<Invoice, DomainError> {
        let view = self
            .orders
            .find_with_relations(order_id)?
            .ok_or_else(|| DomainError::not_found("Order", order_id))?;

        if let Some(existing) = self.invoices.find_by_order(order_id)? {
            return Err(DomainError::Conflict(format!(
                "order {} already has invoice {}",
                order_id, existing.invoice_number
            )));
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let invoice = self.invoices.create(&Invoice {
            id,
            order_id,
            customer: customer_snapshot(&view),
            items: items_snapshot(&view),
            total: view.order.total_amount.clone(),
            invoice_number: invoice_number(now, id),
            pdf_url,
            created_at: now,
        })?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "invoice.issued")
                .on("invoice", invoice.id)
                .with_metadata(json!({ "invoice_number": invoice.invoice_number, "order_id": order_id })),
        );
        Ok(invoice)
    }

    pub fn get_invoice(&self, id: Uuid) -> Result<Invoice, DomainError> {
        self.invoices
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Invoice", id))
    }

    pub fn get_for_order(&self, order_id: Uuid) -> Result<Invoice, DomainError> {
        self.invoices
            .find_by_order(order_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Invoice for order {}", order_id)))
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;
    use crate::application::test_support::{InMemoryOrders, RecordingLogger};
    use crate::domain::order::{NewOrder, NewOrderDetail};

    fn setup() -> (InvoiceService<InMemoryOrders, InMemoryOrders>, Uuid) {
        let repo = InMemoryOrders::default();
        let order_id = OrderRepository::create(
            &repo,
            NewOrder {
                customer_name: "Noor".to_string(),
                customer_phone: "0101".to_string(),
                table_number: "7".to_string(),
                notes: Some("no onions".to_string()),
                total_amount: BigDecimal::from(14),
                qr_code_id: None,
            },
            vec![NewOrderDetail {
                product_id: None,
                variation_id: None,
                product_name: "Falafel".to_string(),
                variation_name: Some("Large".to_string()),
                unit_price: BigDecimal::from(7),
                quantity: 2,
                total_price: BigDecimal::from(14),
            }],
        )
        .unwrap();
        let service = InvoiceService::new(repo.clone(), repo, Arc::new(RecordingLogger::default()));
        (service, order_id)
    }

    #[test]
    fn invoice_snapshots_customer_and_items() {
        let (service, order_id) = setup();

        let invoice = service.issue_invoice(order_id, None).unwrap();

        assert_eq!(invoice.total, BigDecimal::from(14));
        assert_eq!(invoice.customer["name"], "Noor");
        assert_eq!(invoice.customer["table_number"], "7");
        assert_eq!(invoice.items[0]["product_name"], "Falafel");
        assert_eq!(invoice.items[0]["quantity"], 2);
        assert!(invoice.invoice_number.starts_with("INV-"));
        assert_eq!(service.get_for_order(order_id).unwrap().id, invoice.id);
    }

    #[test]
    fn second_invoice_for_same_order_conflicts() {
        let (service, order_id) = setup();
        service.issue_invoice(order_id, None).unwrap();

        assert!(matches!(
            service.issue_invoice(order_id, Some("https://files/x.pdf".to_string())),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn unknown_order_is_not_found() {
        let (service, _) = setup();
        assert!(matches!(
            service.issue_invoice(Uuid::new_v4(), None),
            Err(DomainError::NotFound(_))
        ));
    }
}
