use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::{Product, Variation};
use super::errors::DomainError;
use super::invoice::Invoice;
use super::payment::Payment;

// ── Status tags ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Pending may move to Paid or Cancelled; both of those are terminal.
    /// Re-applying the current status is always allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        *self == next
            || matches!(
                (self, next),
                (OrderStatus::Pending, OrderStatus::Paid)
                    | (OrderStatus::Pending, OrderStatus::Cancelled)
            )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::invalid(format!("unknown order status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishStatus {
    Pending,
    Preparing,
    Ready,
    Served,
}

impl DishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishStatus::Pending => "pending",
            DishStatus::Preparing => "preparing",
            DishStatus::Ready => "ready",
            DishStatus::Served => "served",
        }
    }
}

impl fmt::Display for DishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DishStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(DishStatus::Pending),
            "preparing" => Ok(DishStatus::Preparing),
            "ready" => Ok(DishStatus::Ready),
            "served" => Ok(DishStatus::Served),
            other => Err(DomainError::invalid(format!("unknown dish status '{}'", other))),
        }
    }
}

// ── Write inputs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    pub total_amount: BigDecimal,
    pub qr_code_id: Option<Uuid>,
}

/// A detail line as supplied by the caller. Prices are trusted, not recomputed.
#[derive(Debug, Clone)]
pub struct NewOrderDetail {
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
    pub total_price: BigDecimal,
}

// ── Read models ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub dish_status: DishStatus,
    pub total_amount: BigDecimal,
    pub qr_code_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub detail: OrderDetail,
    pub product: Option<Product>,
    pub variation: Option<Variation>,
}

/// An order with everything hanging off it.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub details: Vec<OrderDetailView>,
    pub payments: Vec<Payment>,
    pub invoice: Option<Invoice>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub table_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_paid_or_cancelled() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_do_not_move() {
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Paid));
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn same_state_is_allowed() {
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Paid));
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!("PAID".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert_eq!("Served".parse::<DishStatus>().unwrap(), DishStatus::Served);
    }

    #[test]
    fn unknown_status_is_invalid_input() {
        let err = "refunded".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
