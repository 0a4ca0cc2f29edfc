use serde::{Deserialize, Serialize};

use crate::entity::de::{flexible_i64, flexible_string};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Order {
    #[serde(deserialize_with = "flexible_string")]
    pub reference_no: String,
    #[serde(deserialize_with = "flexible_string")]
    pub order_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub add_time: String,
    #[serde(deserialize_with = "flexible_i64")]
    pub order_status: i64,
    #[serde(deserialize_with = "flexible_string")]
    pub remark: String,
    #[serde(deserialize_with = "flexible_string")]
    pub firstname: String,
    #[serde(deserialize_with = "flexible_string")]
    pub company: String,
    #[serde(deserialize_with = "flexible_string")]
    pub country: String,
    #[serde(deserialize_with = "flexible_string")]
    pub postcode: String,
    #[serde(deserialize_with = "flexible_string")]
    pub state: String,
    #[serde(deserialize_with = "flexible_string")]
    pub city: String,
    #[serde(deserialize_with = "flexible_string")]
    pub street_address1: String,
    #[serde(rename = "telphone", deserialize_with = "flexible_string")]
    pub telephone: String,
}

/// Fee line of an order
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Fee {
    #[serde(deserialize_with = "flexible_string")]
    pub ft_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub ft_name: String,
    #[serde(deserialize_with = "flexible_string")]
    pub currency_code: String,
    #[serde(deserialize_with = "flexible_string")]
    pub amount: String,
}

/// Fee line attributed to one box; `tracking_number` is empty until the
/// carrier number has been assigned asynchronously.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FeeDetail {
    #[serde(flatten)]
    pub fee: Fee,
    #[serde(deserialize_with = "flexible_string")]
    pub tracking_number: String,
    #[serde(deserialize_with = "flexible_string")]
    pub box_code: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OrderLabels {
    #[serde(deserialize_with = "flexible_string")]
    pub tracking_number: String,
    /// USPS number for UPS MI products, empty otherwise
    #[serde(deserialize_with = "flexible_string")]
    pub tracking_number2: String,
    #[serde(rename = "label_url", deserialize_with = "flexible_string")]
    pub label_url: String,
    #[serde(deserialize_with = "flexible_string")]
    pub file_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CreateOrderResult {
    #[serde(deserialize_with = "flexible_string")]
    pub order_code: String,
    pub fee: Vec<Fee>,
    pub fee_detail: Vec<FeeDetail>,
    /// `None` while labels are still being produced
    pub labels: Option<OrderLabels>,
    #[serde(deserialize_with = "flexible_string")]
    pub merge_label: String,
}
