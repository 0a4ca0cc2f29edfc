use serde::{Deserialize, Serialize};

use crate::entity::de::{flexible_i64, flexible_string};

/// `result` of a successful `/getToken` call.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessToken {
    #[serde(deserialize_with = "flexible_string")]
    pub access_token: String,
    pub user_info: Option<TokenUser>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenUser {
    #[serde(rename = "u_id", deserialize_with = "flexible_i64")]
    pub id: i64,
    #[serde(rename = "u_account", deserialize_with = "flexible_string")]
    pub account: String,
    #[serde(rename = "u_customer_code", deserialize_with = "flexible_string")]
    pub customer_code: String,
}
