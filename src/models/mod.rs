//! Diesel row types, one module per table family.

pub mod category;
pub mod invoice;
pub mod log_entry;
pub mod order;
pub mod order_detail;
pub mod payment;
pub mod product;
pub mod qr_code;
pub mod role;
pub mod theme;
pub mod user;
pub mod variation;
