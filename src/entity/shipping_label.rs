use serde::{Deserialize, Serialize};

use crate::entity::de::{flexible_i64, flexible_string};
use crate::entity::order::{Fee, FeeDetail};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShippingLabel {
    #[serde(deserialize_with = "flexible_string")]
    pub reference_no: String,
    #[serde(deserialize_with = "flexible_string")]
    pub order_code: String,
    /// Commercial or Residential
    #[serde(deserialize_with = "flexible_string")]
    pub order_address_type: String,
    /// 1 submitted, 2 forecast
    #[serde(deserialize_with = "flexible_i64")]
    pub order_status: i64,
    #[serde(deserialize_with = "flexible_string")]
    pub order_sub_status: String,
    #[serde(deserialize_with = "flexible_string")]
    pub order_waiting_status: String,
    #[serde(deserialize_with = "flexible_string")]
    pub sync_service_status: String,
    #[serde(deserialize_with = "flexible_string")]
    pub logistics_err: String,
    pub labels: Vec<Label>,
    #[serde(deserialize_with = "flexible_string")]
    pub merge_label: String,
    pub fee: Vec<Fee>,
    pub fee_detail: Vec<FeeDetail>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Label {
    #[serde(deserialize_with = "flexible_string")]
    pub tracking_number: String,
    pub tracking_number2: Option<String>,
    #[serde(deserialize_with = "flexible_string")]
    pub label_url: String,
    #[serde(deserialize_with = "flexible_string")]
    pub file_type: String,
    pub context: Option<serde_json::Value>,
}
