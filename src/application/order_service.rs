use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::money;
use crate::domain::order::{
    DishStatus, NewOrder, NewOrderDetail, Order, OrderFilter, OrderStatus, OrderView,
};
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::OrderRepository;

const SOURCE: &str = "order_service";

pub struct OrderService<R> {
    repo: R,
    activity: Arc<dyn ActivityLogger>,
}

fn require(value: &str, field: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(format!("{} is required", field)));
    }
    Ok(())
}

fn validate(order: &NewOrder, details: &[NewOrderDetail]) -> Result<(), DomainError> {
    require(&order.customer_name, "customer_name")?;
    require(&order.customer_phone, "customer_phone")?;
    require(&order.table_number, "table_number")?;

    if order.total_amount < BigDecimal::zero() {
        return Err(DomainError::invalid("total_amount must not be negative"));
    }
    money::ensure_storable(&order.total_amount, "total_amount")?;
    if details.is_empty() {
        return Err(DomainError::invalid("an order needs at least one item"));
    }
    for (i, line) in details.iter().enumerate() {
        if line.quantity < 1 {
            return Err(DomainError::invalid(format!(
                "item {}: quantity must be at least 1",
                i + 1
            )));
        }
        if line.unit_price < BigDecimal::zero() || line.total_price < BigDecimal::zero() {
            return Err(DomainError::invalid(format!(
                "item {}: prices must not be negative",
                i + 1
            )));
        }
        money::ensure_storable(&line.unit_price, &format!("item {}: unit_price", i + 1))?;
        money::ensure_storable(&line.total_price, &format!("item {}: total_price", i + 1))?;
        require(&line.product_name, "product_name")?;
    }
    Ok(())
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, activity: Arc<dyn ActivityLogger>) -> Self {
        Self { repo, activity }
    }

    /// Writes the order and its lines in one transaction and returns the
    /// freshly loaded view.
    pub fn create_order(
        &self,
        order: NewOrder,
        details: Vec<NewOrderDetail>,
    ) -> Result<OrderView, DomainError> {
        validate(&order, &details)?;

        let lines = details.len();
        let total = order.total_amount.to_string();
        let id = self.repo.create(order, details)?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "order.created")
                .on("order", id)
                .with_metadata(json!({ "lines": lines, "total_amount": total })),
        );
        self.get_order(id)
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.repo
            .find_with_relations(id)?
            .ok_or_else(|| DomainError::not_found("Order", id))
    }

    pub fn list_orders(
        &self,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult<Order>, DomainError> {
        self.repo.list(filter, page)
    }

    fn load(&self, id: Uuid) -> Result<Order, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Order", id))
    }

    pub fn update_status(&self, id: Uuid, next: OrderStatus) -> Result<Order, DomainError> {
        let mut order = self.load(id)?;
        if !order.status.can_transition_to(next) {
            return Err(DomainError::Conflict(format!(
                "order cannot move from {} to {}",
                order.status, next
            )));
        }

        let previous = order.status;
        order.status = next;
        order.updated_at = Utc::now();
        let saved = self.repo.update(&order)?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "order.status_changed")
                .on("order", id)
                .with_metadata(json!({ "from": previous.as_str(), "to": next.as_str() })),
        );
        Ok(saved)
    }

    pub fn update_dish_status(&self, id: Uuid, next: DishStatus) -> Result<Order, DomainError> {
        let mut order = self.load(id)?;
        order.dish_status = next;
        order.updated_at = Utc::now();
        let saved = self.repo.update(&order)?;

        self.activity.record(
            ActivityEvent::info(SOURCE, "order.dish_status_changed")
                .on("order", id)
                .with_metadata(json!({ "to": next.as_str() })),
        );
        Ok(saved)
    }

    pub fn delete_order(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::not_found("Order", id));
        }
        self.activity
            .record(ActivityEvent::warn(SOURCE, "order.deleted").on("order", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{InMemoryOrders, RecordingLogger};

    fn service() -> (OrderService<InMemoryOrders>, InMemoryOrders, RecordingLogger) {
        let repo = InMemoryOrders::default();
        let logger = RecordingLogger::default();
        (
            OrderService::new(repo.clone(), Arc::new(logger.clone())),
            repo,
            logger,
        )
    }

    fn header() -> NewOrder {
        NewOrder {
            customer_name: "Rui".to_string(),
            customer_phone: "+351900000000".to_string(),
            table_number: "12".to_string(),
            notes: None,
            total_amount: BigDecimal::from(18),
            qr_code_id: None,
        }
    }

    fn line(quantity: i32) -> NewOrderDetail {
        NewOrderDetail {
            product_id: None,
            variation_id: None,
            product_name: "Soup".to_string(),
            variation_name: None,
            unit_price: BigDecimal::from(6),
            quantity,
            total_price: BigDecimal::from(6 * quantity),
        }
    }

    #[test]
    fn create_returns_view_with_lines() {
        let (service, _, logger) = service();

        let view = service.create_order(header(), vec![line(1), line(2)]).unwrap();

        assert_eq!(view.details.len(), 2);
        assert_eq!(view.order.status, OrderStatus::Pending);
        assert_eq!(view.order.dish_status, DishStatus::Pending);
        assert_eq!(logger.actions(), vec!["order.created"]);
    }

    #[test]
    fn create_rejects_empty_orders_and_bad_quantities() {
        let (service, repo, _) = service();

        assert!(matches!(
            service.create_order(header(), vec![]),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            service.create_order(header(), vec![line(0)]),
            Err(DomainError::InvalidInput(msg)) if msg.contains("quantity")
        ));

        let mut nameless = header();
        nameless.customer_name = "  ".to_string();
        assert!(service.create_order(nameless, vec![line(1)]).is_err());

        assert!(repo.orders.all().is_empty());
    }

    #[test]
    fn amounts_beyond_the_money_column_are_rejected() {
        let (service, repo, _) = service();

        let mut huge_total = header();
        huge_total.total_amount = "1e20".parse().unwrap();
        assert!(matches!(
            service.create_order(huge_total, vec![line(1)]),
            Err(DomainError::InvalidInput(msg)) if msg.starts_with("total_amount")
        ));

        let mut huge_line = line(1);
        huge_line.unit_price = "99999999999".parse().unwrap();
        assert!(matches!(
            service.create_order(header(), vec![huge_line]),
            Err(DomainError::InvalidInput(msg)) if msg.contains("unit_price")
        ));

        assert!(repo.orders.all().is_empty());
    }

    #[test]
    fn paid_order_cannot_be_cancelled() {
        let (service, _, _) = service();
        let id = service.create_order(header(), vec![line(1)]).unwrap().order.id;

        service.update_status(id, OrderStatus::Paid).unwrap();
        let err = service.update_status(id, OrderStatus::Cancelled).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(service.get_order(id).unwrap().order.status, OrderStatus::Paid);
    }

    #[test]
    fn dish_status_moves_freely() {
        let (service, _, _) = service();
        let id = service.create_order(header(), vec![line(1)]).unwrap().order.id;

        service.update_dish_status(id, DishStatus::Served).unwrap();
        let order = service.update_dish_status(id, DishStatus::Preparing).unwrap();

        assert_eq!(order.dish_status, DishStatus::Preparing);
    }

    #[test]
    fn delete_missing_order_is_not_found() {
        let (service, _, _) = service();
        assert!(matches!(
            service.delete_order(Uuid::new_v4()),
            Err(DomainError::NotFound(_))
        ));
    }
}
