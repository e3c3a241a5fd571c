//! In-memory repositories for service tests.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::{Permission, Role, User};
use crate::domain::activity::{ActivityEvent, ActivityLogger, LogFilter, LogRecord};
use crate::domain::catalog::{Category, CategoryWithProducts, Product, ProductWithVariations, Variation};
use crate::domain::errors::DomainError;
use crate::domain::invoice::Invoice;
use crate::domain::order::{
    DishStatus, NewOrder, NewOrderDetail, Order, OrderDetail, OrderDetailView, OrderFilter,
    OrderStatus, OrderView,
};
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::payment::Payment;
use crate::domain::ports::*;
use crate::domain::qr_code::QrCode;
use crate::domain::theme::Theme;

pub(crate) struct MemTable<T>(Arc<Mutex<Vec<T>>>);

impl<T> Clone for MemTable<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for MemTable<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }
}

impl<T: Clone> MemTable<T> {
    pub(crate) fn all(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, item: T) {
        self.0.lock().unwrap().push(item);
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.0.lock().unwrap().iter().find(|t| pred(t)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.0.lock().unwrap().iter().filter(|t| pred(t)).cloned().collect()
    }

    fn replace(&self, pred: impl Fn(&T) -> bool, item: T) -> Result<T, DomainError> {
        let mut rows = self.0.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|t| pred(t))
            .ok_or_else(|| DomainError::NotFound("Record".to_string()))?;
        *slot = item.clone();
        Ok(item)
    }

    fn remove(&self, pred: impl Fn(&T) -> bool) -> bool {
        let mut rows = self.0.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !pred(t));
        rows.len() != before
    }
}

fn page_of<T>(items: Vec<T>, page: PageRequest) -> ListResult<T> {
    let total = items.len() as i64;
    ListResult {
        items: items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect(),
        total,
    }
}

// ── Activity ─────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub(crate) struct RecordingLogger {
    pub(crate) events: MemTable<ActivityEvent>,
}

impl RecordingLogger {
    pub(crate) fn actions(&self) -> Vec<String> {
        self.events.all().into_iter().map(|e| e.action).collect()
    }
}

impl ActivityLogger for RecordingLogger {
    fn record(&self, event: ActivityEvent) {
        self.events.push(event);
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryLogs {
    pub(crate) rows: MemTable<LogRecord>,
    pub(crate) failing: bool,
}

impl LogRepository for InMemoryLogs {
    fn append(&self, record: &LogRecord) -> Result<(), DomainError> {
        if self.failing {
            return Err(DomainError::Internal("log table unavailable".to_string()));
        }
        self.rows.push(record.clone());
        Ok(())
    }

    fn list(&self, filter: &LogFilter, page: PageRequest) -> Result<ListResult<LogRecord>, DomainError> {
        let rows = self.rows.filter(|r| {
            filter.level.map_or(true, |l| r.level == l)
                && filter.source.as_ref().map_or(true, |s| &r.source == s)
        });
        Ok(page_of(rows, page))
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub(crate) struct InMemoryCatalog {
    pub(crate) categories: MemTable<Category>,
    pub(crate) products: MemTable<Product>,
    pub(crate) variations: MemTable<Variation>,
}

impl InMemoryCatalog {
    fn nest(&self, category: Category) -> CategoryWithProducts {
        let products = self
            .products
            .filter(|p| p.category_id == Some(category.id))
            .into_iter()
            .map(|product| ProductWithVariations {
                variations: self.variations.filter(|v| v.product_id == product.id),
                product,
            })
            .collect();
        CategoryWithProducts { category, products }
    }
}

impl CategoryRepository for InMemoryCatalog {
    fn create(&self, category: &Category) -> Result<Category, DomainError> {
        self.categories.push(category.clone());
        Ok(category.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        Ok(self.categories.find(|c| c.id == id))
    }

    fn find_with_products(&self, id: Uuid) -> Result<Option<CategoryWithProducts>, DomainError> {
        Ok(self.categories.find(|c| c.id == id).map(|c| self.nest(c)))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let wanted = name.trim().to_lowercase();
        Ok(self.categories.find(|c| c.name.to_lowercase() == wanted))
    }

    fn list(&self, page: PageRequest) -> Result<ListResult<Category>, DomainError> {
        Ok(page_of(self.categories.all(), page))
    }

    fn list_with_products(
        &self,
        page: PageRequest,
    ) -> Result<ListResult<CategoryWithProducts>, DomainError> {
        Ok(page_of(self.categories.all(), page).map(|c| self.nest(c)))
    }

    fn update(&self, category: &Category) -> Result<Category, DomainError> {
        self.categories.replace(|c| c.id == category.id, category.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.categories.remove(|c| c.id == id))
    }
}

impl ProductRepository for InMemoryCatalog {
    fn create(&self, product: &Product) -> Result<Product, DomainError> {
        self.products.push(product.clone());
        Ok(product.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.products.find(|p| p.id == id))
    }

    fn list(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<ListResult<Product>, DomainError> {
        let rows = self
            .products
            .filter(|p| category_id.map_or(true, |c| p.category_id == Some(c)));
        Ok(page_of(rows, page))
    }

    fn update(&self, product: &Product) -> Result<Product, DomainError> {
        self.products.replace(|p| p.id == product.id, product.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.products.remove(|p| p.id == id))
    }

    fn count_by_category(&self, category_id: Uuid) -> Result<i64, DomainError> {
        Ok(self.products.filter(|p| p.category_id == Some(category_id)).len() as i64)
    }
}

impl VariationRepository for InMemoryCatalog {
    fn create(&self, variation: &Variation) -> Result<Variation, DomainError> {
        self.variations.push(variation.clone());
        Ok(variation.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Variation>, DomainError> {
        Ok(self.variations.find(|v| v.id == id))
    }

    fn list_by_product(&self, product_id: Uuid) -> Result<Vec<Variation>, DomainError> {
        Ok(self.variations.filter(|v| v.product_id == product_id))
    }

    fn update(&self, variation: &Variation) -> Result<Variation, DomainError> {
        self.variations.replace(|v| v.id == variation.id, variation.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.variations.remove(|v| v.id == id))
    }

    fn count_by_product(&self, product_id: Uuid) -> Result<i64, DomainError> {
        Ok(self.variations.filter(|v| v.product_id == product_id).len() as i64)
    }
}

// ── Orders, payments, invoices ───────────────────────────────────────────────

#[derive(Clone, Default)]
pub(crate) struct InMemoryOrders {
    pub(crate) orders: MemTable<Order>,
    pub(crate) details: MemTable<OrderDetail>,
    pub(crate) payments: MemTable<Payment>,
    pub(crate) invoices: MemTable<Invoice>,
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, order: NewOrder, details: Vec<NewOrderDetail>) -> Result<Uuid, DomainError> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.orders.push(Order {
            id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            table_number: order.table_number,
            notes: order.notes,
            status: OrderStatus::Pending,
            dish_status: DishStatus::Pending,
            total_amount: order.total_amount,
            qr_code_id: order.qr_code_id,
            created_at: now,
            updated_at: now,
        });
        for d in details {
            self.details.push(OrderDetail {
                id: Uuid::new_v4(),
                order_id: id,
                product_id: d.product_id,
                variation_id: d.variation_id,
                product_name: d.product_name,
                variation_name: d.variation_name,
                unit_price: d.unit_price,
                quantity: d.quantity,
                total_price: d.total_price,
                created_at: now,
            });
        }
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.find(|o| o.id == id))
    }

    fn find_with_relations(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self.orders.find(|o| o.id == id).map(|order| OrderView {
            details: self
                .details
                .filter(|d| d.order_id == id)
                .into_iter()
                .map(|detail| OrderDetailView {
                    detail,
                    product: None,
                    variation: None,
                })
                .collect(),
            payments: self.payments.filter(|p| p.order_id == id),
            invoice: self.invoices.find(|i| i.order_id == id),
            order,
        }))
    }

    fn list(&self, filter: &OrderFilter, page: PageRequest) -> Result<ListResult<Order>, DomainError> {
        let rows = self.orders.filter(|o| {
            filter.status.map_or(true, |s| o.status == s)
                && filter
                    .table_number
                    .as_ref()
                    .map_or(true, |t| &o.table_number == t)
        });
        Ok(page_of(rows, page))
    }

    fn update(&self, order: &Order) -> Result<Order, DomainError> {
        self.orders.replace(|o| o.id == order.id, order.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.details.remove(|d| d.order_id == id);
        Ok(self.orders.remove(|o| o.id == id))
    }
}

impl PaymentRepository for InMemoryOrders {
    fn create(&self, payment: &Payment) -> Result<Payment, DomainError> {
        self.payments.push(payment.clone());
        Ok(payment.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.find(|p| p.id == id))
    }

    fn list_by_order(&self, order_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        Ok(self.payments.filter(|p| p.order_id == order_id))
    }

    fn update(&self, payment: &Payment) -> Result<Payment, DomainError> {
        self.payments.replace(|p| p.id == payment.id, payment.clone())
    }
}

impl InvoiceRepository for InMemoryOrders {
    fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        if self.invoices.find(|i| i.order_id == invoice.order_id).is_some() {
            return Err(DomainError::Conflict("invoice already exists".to_string()));
        }
        self.invoices.push(invoice.clone());
        Ok(invoice.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, DomainError> {
        Ok(self.invoices.find(|i| i.id == id))
    }

    fn find_by_order(&self, order_id: Uuid) -> Result<Option<Invoice>, DomainError> {
        Ok(self.invoices.find(|i| i.order_id == order_id))
    }
}

// ── Access control ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub(crate) struct InMemoryAccess {
    pub(crate) users: MemTable<User>,
    pub(crate) roles: MemTable<Role>,
    pub(crate) permissions: MemTable<Permission>,
    pub(crate) links: MemTable<(Uuid, Uuid)>,
}

impl UserRepository for InMemoryAccess {
    fn create(&self, user: &User) -> Result<User, DomainError> {
        if self.users.find(|u| u.email == user.email).is_some() {
            return Err(DomainError::Conflict("duplicate email".to_string()));
        }
        self.users.push(user.clone());
        Ok(user.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.find(|u| u.id == id))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find(|u| u.email == email))
    }

    fn list(&self, page: PageRequest) -> Result<ListResult<User>, DomainError> {
        Ok(page_of(self.users.all(), page))
    }

    fn update(&self, user: &User) -> Result<User, DomainError> {
        self.users.replace(|u| u.id == user.id, user.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.users.remove(|u| u.id == id))
    }
}

impl RoleRepository for InMemoryAccess {
    fn create(&self, role: &Role) -> Result<Role, DomainError> {
        self.roles.push(role.clone());
        Ok(role.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        Ok(self.roles.find(|r| r.id == id))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        Ok(self.roles.find(|r| r.name == name))
    }

    fn list(&self) -> Result<Vec<Role>, DomainError> {
        Ok(self.roles.all())
    }

    fn update(&self, role: &Role) -> Result<Role, DomainError> {
        self.roles.replace(|r| r.id == role.id, role.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.links.remove(|(r, _)| *r == id);
        for mut user in self.users.filter(|u| u.role_id == Some(id)) {
            user.role_id = None;
            self.users.replace(|u| u.id == user.id, user.clone())?;
        }
        Ok(self.roles.remove(|r| r.id == id))
    }

    fn permissions_of(&self, role_id: Uuid) -> Result<Vec<Permission>, DomainError> {
        let ids: Vec<Uuid> = self
            .links
            .filter(|(r, _)| *r == role_id)
            .into_iter()
            .map(|(_, p)| p)
            .collect();
        Ok(self.permissions.filter(|p| ids.contains(&p.id)))
    }

    fn replace_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<(), DomainError> {
        self.links.remove(|(r, _)| *r == role_id);
        for &pid in permission_ids {
            self.links.push((role_id, pid));
        }
        Ok(())
    }
}

impl PermissionRepository for InMemoryAccess {
    fn create(&self, permission: &Permission) -> Result<Permission, DomainError> {
        self.permissions.push(permission.clone());
        Ok(permission.clone())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Permission>, DomainError> {
        Ok(self.permissions.find(|p| p.name == name))
    }

    fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError> {
        Ok(self.permissions.filter(|p| ids.contains(&p.id)))
    }

    fn list(&self) -> Result<Vec<Permission>, DomainError> {
        Ok(self.permissions.all())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.links.remove(|(_, p)| *p == id);
        Ok(self.permissions.remove(|p| p.id == id))
    }
}

// ── QR codes & themes ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub(crate) struct InMemoryQrCodes {
    pub(crate) rows: MemTable<QrCode>,
}

impl QrCodeRepository for InMemoryQrCodes {
    fn create(&self, qr_code: &QrCode) -> Result<QrCode, DomainError> {
        self.rows.push(qr_code.clone());
        Ok(qr_code.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<QrCode>, DomainError> {
        Ok(self.rows.find(|q| q.id == id))
    }

    fn find_by_code(&self, code: &str) -> Result<Option<QrCode>, DomainError> {
        Ok(self.rows.find(|q| q.code == code))
    }

    fn list(&self, page: PageRequest) -> Result<ListResult<QrCode>, DomainError> {
        Ok(page_of(self.rows.all(), page))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.rows.remove(|q| q.id == id))
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryThemes {
    pub(crate) rows: MemTable<Theme>,
}

impl ThemeRepository for InMemoryThemes {
    fn create(&self, theme: &Theme) -> Result<Theme, DomainError> {
        self.rows.push(theme.clone());
        Ok(theme.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Theme>, DomainError> {
        Ok(self.rows.find(|t| t.id == id))
    }

    fn find_active(&self) -> Result<Option<Theme>, DomainError> {
        Ok(self
            .rows
            .filter(|t| t.is_active)
            .into_iter()
            .max_by_key(|t| t.updated_at))
    }

    fn list(&self) -> Result<Vec<Theme>, DomainError> {
        Ok(self.rows.all())
    }

    fn update(&self, theme: &Theme) -> Result<Theme, DomainError> {
        self.rows.replace(|t| t.id == theme.id, theme.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.rows.remove(|t| t.id == id))
    }
}
