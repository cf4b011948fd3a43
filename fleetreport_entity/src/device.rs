use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One managed network device belonging to a customer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer: String,
    pub address: Option<String>,
    /// ISO-8601 timestamp of the last configuration change.
    pub config_updated: String,
    pub details: Option<String>,
    pub firmware: String,
    pub lan_ip: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,
    #[sea_orm(unique)]
    pub mac: String,
    pub model: String,
    pub name: String,
    pub network_id: String,
    pub notes: Option<String>,
    pub product_type: ProductType,
    #[sea_orm(unique)]
    pub serial: String,
    /// Space separated.
    pub tags: Option<String>,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Category of network device, persisted as its lowercase name.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[sea_orm(string_value = "wireless")]
    Wireless,
    #[sea_orm(string_value = "switch")]
    Switch,
    #[sea_orm(string_value = "appliance")]
    Appliance,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Wireless,
        ProductType::Switch,
        ProductType::Appliance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Wireless => "wireless",
            ProductType::Switch => "switch",
            ProductType::Appliance => "appliance",
        }
    }

    /// Short form used in device names.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ProductType::Wireless => "AP",
            ProductType::Switch => "SW",
            ProductType::Appliance => "MX",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
