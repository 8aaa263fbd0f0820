//! `SeaORM` Entity for the product catalog

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "public", table_name = "Product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// URL slug derived from the name at creation time
    #[sea_orm(column_type = "Text", unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Listed price in whole rupees
    pub price: i64,
    /// Strike-through price before discount, if discounted
    #[sea_orm(column_name = "originalPrice", nullable)]
    pub original_price: Option<i64>,
    /// Discount percentage shown on the listing card
    #[sea_orm(nullable)]
    pub discount: Option<i32>,
    pub category: super::sea_orm_active_enums::Category,
    /// JSON array of color names
    pub colors: Json,
    /// JSON array of size labels
    pub sizes: Json,
    /// JSON array of hosted image URLs
    pub images: Json,
    /// JSON array of bullet-point features
    pub features: Json,
    #[sea_orm(column_name = "inStock")]
    pub in_stock: bool,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTime,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
