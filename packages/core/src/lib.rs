pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod hub;
pub mod money;

pub use cart::{Cart, CartItem};
pub use catalog::{Category, SortKey, slugify};
pub use favorites::Favorites;
pub use hub::{Environment, Hub, ShippingPolicy};
