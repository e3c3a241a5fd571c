pub mod access;
pub mod activity;
pub mod catalog;
pub mod errors;
pub mod invoice;
pub mod money;
pub mod order;
pub mod pagination;
pub mod payment;
pub mod ports;
pub mod qr_code;
pub mod theme;
