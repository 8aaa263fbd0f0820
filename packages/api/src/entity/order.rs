//! `SeaORM` Entity for customer orders

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One checkout. Totals are the amounts the storefront presented at
/// checkout time; the shipping block is a snapshot of the contact at that
/// moment, independent of later edits to the `User` row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "public", table_name = "Order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    /// Human-facing order number, `ORD-{timestamp}-{random}`
    #[sea_orm(column_name = "orderNumber", column_type = "Text", unique)]
    pub order_number: String,
    #[sea_orm(column_name = "userId", column_type = "Text")]
    pub user_id: String,
    /// Item total in whole rupees
    pub subtotal: i64,
    pub shipping: i64,
    pub tax: i64,
    pub total: i64,
    pub status: super::sea_orm_active_enums::OrderStatus,
    #[sea_orm(column_name = "paymentStatus")]
    pub payment_status: super::sea_orm_active_enums::PaymentStatus,
    /// Gateway-side order id, when checkout went through the gateway
    #[sea_orm(column_name = "gatewayOrderId", column_type = "Text", nullable)]
    pub gateway_order_id: Option<String>,
    #[sea_orm(column_name = "gatewayPaymentId", column_type = "Text", nullable)]
    pub gateway_payment_id: Option<String>,
    #[sea_orm(column_name = "gatewaySignature", column_type = "Text", nullable)]
    pub gateway_signature: Option<String>,
    #[sea_orm(column_name = "shippingName", column_type = "Text")]
    pub shipping_name: String,
    #[sea_orm(column_name = "shippingPhone", column_type = "Text")]
    pub shipping_phone: String,
    #[sea_orm(column_name = "shippingAddress", column_type = "Text")]
    pub shipping_address: String,
    #[sea_orm(column_name = "shippingCity", column_type = "Text")]
    pub shipping_city: String,
    #[sea_orm(column_name = "shippingState", column_type = "Text")]
    pub shipping_state: String,
    #[sea_orm(column_name = "shippingPincode", column_type = "Text")]
    pub shipping_pincode: String,
    #[sea_orm(column_name = "trackingNumber", column_type = "Text", nullable)]
    pub tracking_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTime,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
