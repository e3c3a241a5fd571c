use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{Product, Variation};
use crate::domain::errors::DomainError;
use crate::domain::order::{
    DishStatus, NewOrder, NewOrderDetail, Order, OrderDetailView, OrderFilter, OrderStatus,
    OrderView,
};
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::payment::Payment;
use crate::domain::ports::OrderRepository;
use crate::models::invoice::InvoiceRow;
use crate::models::order::{NewOrderRow, OrderChangeset, OrderRow};
use crate::models::order_detail::{NewOrderDetailRow, OrderDetailRow};
use crate::models::payment::PaymentRow;
use crate::models::product::ProductRow;
use crate::models::variation::VariationRow;
use crate::schema::{order_details, orders, payments, products, variations};

use super::insert_failed;

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder, details: Vec<NewOrderDetail>) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order header
            let order_id: Uuid = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: Uuid::new_v4(),
                    customer_name: order.customer_name,
                    customer_phone: order.customer_phone,
                    table_number: order.table_number,
                    notes: order.notes,
                    status: OrderStatus::Pending.to_string(),
                    dish_status: DishStatus::Pending.to_string(),
                    total_amount: order.total_amount,
                    qr_code_id: order.qr_code_id,
                })
                .returning(orders::id)
                .get_result(conn)
                .map_err(|e| insert_failed("order", e))?;

            if order_id.is_nil() {
                return Err(DomainError::MissingIdentifier("order"));
            }

            // 2. Insert detail lines one by one; any failure rolls back the order too
            for detail in details {
                diesel::insert_into(order_details::table)
                    .values(&NewOrderDetailRow::stamped(order_id, detail))
                    .execute(conn)
                    .map_err(|e| insert_failed("order detail", e))?;
            }

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn find_with_relations(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let details = OrderDetailRow::belonging_to(&order)
            .select(OrderDetailRow::as_select())
            .order(order_details::created_at.asc())
            .load(&mut conn)?;

        let product_ids: Vec<Uuid> = details.iter().filter_map(|d| d.product_id).collect();
        let variation_ids: Vec<Uuid> = details.iter().filter_map(|d| d.variation_id).collect();

        let products: HashMap<Uuid, Product> = products::table
            .filter(products::id.eq_any(&product_ids))
            .select(ProductRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(|row| (row.id, Product::from(row)))
            .collect();

        let mut variations: HashMap<Uuid, Variation> = HashMap::new();
        for row in variations::table
            .filter(variations::id.eq_any(&variation_ids))
            .select(VariationRow::as_select())
            .load(&mut conn)?
        {
            variations.insert(row.id, Variation::try_from(row)?);
        }

        let payments = PaymentRow::belonging_to(&order)
            .select(PaymentRow::as_select())
            .order(payments::created_at.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Payment::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let invoice = InvoiceRow::belonging_to(&order)
            .select(InvoiceRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Into::into);

        let details = details
            .into_iter()
            .map(|d| OrderDetailView {
                product: d.product_id.and_then(|pid| products.get(&pid).cloned()),
                variation: d.variation_id.and_then(|vid| variations.get(&vid).cloned()),
                detail: d.into(),
            })
            .collect();

        Ok(Some(OrderView {
            order: order.try_into()?,
            details,
            payments,
            invoice,
        }))
    }

    fn list(&self, filter: &OrderFilter, page: PageRequest) -> Result<ListResult<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut count_query = orders::table.into_boxed();
            let mut rows_query = orders::table.select(OrderRow::as_select()).into_boxed();

            if let Some(status) = filter.status {
                count_query = count_query.filter(orders::status.eq(status.as_str()));
                rows_query = rows_query.filter(orders::status.eq(status.as_str()));
            }
            if let Some(table_number) = &filter.table_number {
                count_query = count_query.filter(orders::table_number.eq(table_number.clone()));
                rows_query = rows_query.filter(orders::table_number.eq(table_number.clone()));
            }

            let total: i64 = count_query.count().get_result(conn)?;

            let rows = rows_query
                .order(orders::created_at.desc())
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(Order::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
                total,
            })
        })
    }

    fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        let row: OrderRow = diesel::update(orders::table.find(order.id))
            .set(&OrderChangeset::from(order))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(orders::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
