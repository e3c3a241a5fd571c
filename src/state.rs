use std::sync::Arc;

use crate::application::activity::DbActivityLogger;
use crate::application::category_service::CategoryService;
use crate::application::invoice_service::InvoiceService;
use crate::application::log_service::LogService;
use crate::application::order_service::OrderService;
use crate::application::payment_service::PaymentService;
use crate::application::product_service::ProductService;
use crate::application::qr_code_service::QrCodeService;
use crate::application::role_service::RoleService;
use crate::application::theme_service::ThemeService;
use crate::application::user_service::UserService;
use crate::application::variation_service::VariationService;
use crate::auth::PasswordHasher;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::domain::activity::ActivityLogger;
use crate::infrastructure::*;

/// Every service, wired to the Diesel repositories. Shared across workers
/// through `web::Data`.
pub struct AppState {
    pub categories: CategoryService<DieselCategoryRepository, DieselProductRepository>,
    pub products:
        ProductService<DieselProductRepository, DieselCategoryRepository, DieselVariationRepository>,
    pub variations: VariationService<DieselVariationRepository, DieselProductRepository>,
    pub orders: OrderService<DieselOrderRepository>,
    pub payments: PaymentService<DieselPaymentRepository, DieselOrderRepository>,
    pub invoices: InvoiceService<DieselInvoiceRepository, DieselOrderRepository>,
    pub users: UserService<DieselUserRepository, DieselRoleRepository>,
    pub roles: RoleService<DieselRoleRepository, DieselPermissionRepository>,
    pub qr_codes: QrCodeService<DieselQrCodeRepository>,
    pub themes: ThemeService<DieselThemeRepository>,
    pub logs: LogService<DieselLogRepository>,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        Self::with_hasher(pool, config, PasswordHasher::default())
    }

    pub fn with_hasher(pool: DbPool, config: &AppConfig, hasher: PasswordHasher) -> Self {
        let activity: Arc<dyn ActivityLogger> = Arc::new(DbActivityLogger::new(
            DieselLogRepository::new(pool.clone()),
            &config.environment,
            &config.application_name,
        ));

        let categories = || DieselCategoryRepository::new(pool.clone());
        let products = || DieselProductRepository::new(pool.clone());
        let variations = || DieselVariationRepository::new(pool.clone());
        let orders = || DieselOrderRepository::new(pool.clone());
        let roles = || DieselRoleRepository::new(pool.clone());

        Self {
            categories: CategoryService::new(categories(), products(), activity.clone()),
            products: ProductService::new(products(), categories(), variations(), activity.clone()),
            variations: VariationService::new(variations(), products(), activity.clone()),
            orders: OrderService::new(orders(), activity.clone()),
            payments: PaymentService::new(
                DieselPaymentRepository::new(pool.clone()),
                orders(),
                activity.clone(),
            ),
            invoices: InvoiceService::new(
                DieselInvoiceRepository::new(pool.clone()),
                orders(),
                activity.clone(),
            ),
            users: UserService::new(
                DieselUserRepository::new(pool.clone()),
                roles(),
                hasher,
                activity.clone(),
            ),
            roles: RoleService::new(
                roles(),
                DieselPermissionRepository::new(pool.clone()),
                activity.clone(),
            ),
            qr_codes: QrCodeService::new(
                DieselQrCodeRepository::new(pool.clone()),
                &config.public_base_url,
                activity.clone(),
            ),
            themes: ThemeService::new(DieselThemeRepository::new(pool.clone()), activity),
            logs: LogService::new(DieselLogRepository::new(pool)),
        }
    }
}
