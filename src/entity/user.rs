use serde::{Deserialize, Serialize};

use crate::entity::de::flexible_string;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UserInfo {
    #[serde(deserialize_with = "flexible_string")]
    pub code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub balance: String,
    pub sm_code: Vec<String>,
    pub address: Vec<ShipperAddress>,
}

/// Sender on file with the carrier. When both an address and a shipper code
/// are sent, the address wins.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShipperAddress {
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "flexible_string")]
    pub shipper_company: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_address1: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "flexible_string")]
    pub shipper_address2: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_country: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_state_province: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_city: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_postal_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipper_tel_phone: String,
}
