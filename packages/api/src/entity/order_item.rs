//! `SeaORM` Entity for order line items

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of an order. Name and price are snapshots taken at purchase
/// time so order history stays stable when the catalog changes;
/// `product_id` is a loose reference, not a foreign key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "public", table_name = "OrderItem")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_name = "orderId", column_type = "Text")]
    pub order_id: String,
    #[sea_orm(column_name = "productId", column_type = "Text")]
    pub product_id: String,
    /// Product name at purchase time
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// Unit price in whole rupees at purchase time
    pub price: i64,
    pub quantity: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub size: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub color: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
