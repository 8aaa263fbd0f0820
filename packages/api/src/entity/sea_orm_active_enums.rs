//! `SeaORM` active enums shared by the storefront entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "Category")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[sea_orm(string_value = "VASTRA")]
    Vastra,
    #[sea_orm(string_value = "MUKUT")]
    Mukut,
    #[sea_orm(string_value = "BANSURI")]
    Bansuri,
    #[sea_orm(string_value = "ACCESSORY")]
    Accessory,
}

impl From<shringar::Category> for Category {
    fn from(value: shringar::Category) -> Self {
        match value {
            shringar::Category::Vastra => Category::Vastra,
            shringar::Category::Mukut => Category::Mukut,
            shringar::Category::Bansuri => Category::Bansuri,
            shringar::Category::Accessory => Category::Accessory,
        }
    }
}

impl From<Category> for shringar::Category {
    fn from(value: Category) -> Self {
        match value {
            Category::Vastra => shringar::Category::Vastra,
            Category::Mukut => shringar::Category::Mukut,
            Category::Bansuri => shringar::Category::Bansuri,
            Category::Accessory => shringar::Category::Accessory,
        }
    }
}

/// Fulfilment state. No transition rules are enforced: the admin panel may
/// set any status from any other.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "OrderStatus")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "SHIPPED")]
    Shipped,
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "PaymentStatus")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "PAID")]
    Paid,
    #[sea_orm(string_value = "FAILED")]
    Failed,
    #[sea_orm(string_value = "REFUNDED")]
    Refunded,
}
