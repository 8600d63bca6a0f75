pub mod cart_line;
pub mod customer;
pub mod order;
pub mod product;
