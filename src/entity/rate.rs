use serde::{Deserialize, Serialize};

use crate::entity::de::flexible_string;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RateCalcResult {
    #[serde(deserialize_with = "flexible_string")]
    pub sm_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub address_type_text: String,
    #[serde(deserialize_with = "flexible_string")]
    pub address_type: String,
    #[serde(deserialize_with = "flexible_string")]
    pub currency_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub shipping_charge: String,
    #[serde(deserialize_with = "flexible_string")]
    pub total_charge: String,
    pub charge_detail: Vec<ChargeDetail>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChargeDetail {
    #[serde(deserialize_with = "flexible_string")]
    pub ft_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub fee_type_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub charge_desc: String,
    #[serde(deserialize_with = "flexible_string")]
    pub amount: String,
}
