use serde::{Deserialize, Serialize};

use crate::entity::de::flexible_string;

/// Manifest generated for a batch of tracking numbers shipping from one address.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScanForm {
    #[serde(deserialize_with = "flexible_string")]
    pub tracking_number: String,
    #[serde(deserialize_with = "flexible_string")]
    pub scan_form_url: String,
    #[serde(deserialize_with = "flexible_string")]
    pub file_type: String,
}
