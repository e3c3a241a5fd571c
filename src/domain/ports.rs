use uuid::Uuid;

use super::access::{Permission, Role, User};
use super::activity::{LogFilter, LogRecord};
use super::catalog::{Category, CategoryWithProducts, Product, Variation};
use super::errors::DomainError;
use super::invoice::Invoice;
use super::order::{NewOrder, NewOrderDetail, Order, OrderFilter, OrderView};
use super::pagination::{ListResult, PageRequest};
use super::payment::Payment;
use super::qr_code::QrCode;
use super::theme::Theme;

// Every `update` is a full-row replace of the given entity; every `delete`
// reports whether a row was removed.

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, order: NewOrder, details: Vec<NewOrderDetail>) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn find_with_relations(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, filter: &OrderFilter, page: PageRequest) -> Result<ListResult<Order>, DomainError>;
    fn update(&self, order: &Order) -> Result<Order, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait PaymentRepository: Send + Sync + 'static {
    fn create(&self, payment: &Payment) -> Result<Payment, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError>;
    fn list_by_order(&self, order_id: Uuid) -> Result<Vec<Payment>, DomainError>;
    fn update(&self, payment: &Payment) -> Result<Payment, DomainError>;
}

pub trait InvoiceRepository: Send + Sync + 'static {
    fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, DomainError>;
    fn find_by_order(&self, order_id: Uuid) -> Result<Option<Invoice>, DomainError>;
}

pub trait CategoryRepository: Send + Sync + 'static {
    fn create(&self, category: &Category) -> Result<Category, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
    fn find_with_products(&self, id: Uuid) -> Result<Option<CategoryWithProducts>, DomainError>;
    /// Case-insensitive lookup.
    fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;
    fn list(&self, page: PageRequest) -> Result<ListResult<Category>, DomainError>;
    fn list_with_products(
        &self,
        page: PageRequest,
    ) -> Result<ListResult<CategoryWithProducts>, DomainError>;
    fn update(&self, category: &Category) -> Result<Category, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, product: &Product) -> Result<Product, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list(
        &self,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<ListResult<Product>, DomainError>;
    fn update(&self, product: &Product) -> Result<Product, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    fn count_by_category(&self, category_id: Uuid) -> Result<i64, DomainError>;
}

pub trait VariationRepository: Send + Sync + 'static {
    fn create(&self, variation: &Variation) -> Result<Variation, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Variation>, DomainError>;
    fn list_by_product(&self, product_id: Uuid) -> Result<Vec<Variation>, DomainError>;
    fn update(&self, variation: &Variation) -> Result<Variation, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    fn count_by_product(&self, product_id: Uuid) -> Result<i64, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn create(&self, user: &User) -> Result<User, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    fn list(&self, page: PageRequest) -> Result<ListResult<User>, DomainError>;
    fn update(&self, user: &User) -> Result<User, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait RoleRepository: Send + Sync + 'static {
    fn create(&self, role: &Role) -> Result<Role, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError>;
    fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    fn list(&self) -> Result<Vec<Role>, DomainError>;
    fn update(&self, role: &Role) -> Result<Role, DomainError>;
    /// Detaches users, drops permission links and removes the role atomically.
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    fn permissions_of(&self, role_id: Uuid) -> Result<Vec<Permission>, DomainError>;
    /// Replaces the role's permission set atomically.
    fn replace_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<(), DomainError>;
}

pub trait PermissionRepository: Send + Sync + 'static {
    fn create(&self, permission: &Permission) -> Result<Permission, DomainError>;
    fn find_by_name(&self, name: &str) -> Result<Option<Permission>, DomainError>;
    fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError>;
    fn list(&self) -> Result<Vec<Permission>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait QrCodeRepository: Send + Sync + 'static {
    fn create(&self, qr_code: &QrCode) -> Result<QrCode, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<QrCode>, DomainError>;
    fn find_by_code(&self, code: &str) -> Result<Option<QrCode>, DomainError>;
    fn list(&self, page: PageRequest) -> Result<ListResult<QrCode>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait ThemeRepository: Send + Sync + 'static {
    fn create(&self, theme: &Theme) -> Result<Theme, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Theme>, DomainError>;
    /// Most recently updated active theme.
    fn find_active(&self) -> Result<Option<Theme>, DomainError>;
    fn list(&self) -> Result<Vec<Theme>, DomainError>;
    fn update(&self, theme: &Theme) -> Result<Theme, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// Append-only.
pub trait LogRepository: Send + Sync + 'static {
    fn append(&self, record: &LogRecord) -> Result<(), DomainError>;
    fn list(&self, filter: &LogFilter, page: PageRequest) -> Result<ListResult<LogRecord>, DomainError>;
}
