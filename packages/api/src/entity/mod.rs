pub mod prelude;

pub mod order;
pub mod order_item;
pub mod product;
pub mod sea_orm_active_enums;
pub mod user;
