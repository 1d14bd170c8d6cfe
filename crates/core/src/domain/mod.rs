pub mod product;
pub mod suggestion;
