pub mod activity;
pub mod category_service;
pub mod guards;
pub mod invoice_service;
pub mod log_service;
pub mod order_service;
pub mod payment_service;
pub mod product_service;
pub mod qr_code_service;
pub mod role_service;
pub mod theme_service;
pub mod user_service;
pub mod variation_service;

#[cfg(test)]
pub(crate) mod test_support;
