pub mod a001_purchase_invoice;
pub mod a002_sale_invoice;
pub mod common;
