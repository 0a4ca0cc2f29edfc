use serde::Serialize;

use crate::client::Client;
use crate::entity::rate::RateCalcResult;
use crate::error::Result;
use crate::services::order::Shipment;
use crate::utils::constants::PATH_RATES;
use crate::validation::{Validate, ValidationErrors};

/// Order forecast submitted for a fee estimate.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RateCalcRequest {
    #[serde(flatten)]
    pub shipment: Shipment,
    /// 1 requests a pickup; ignored by products without pickup support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_up: Option<u8>,
}

impl Validate for RateCalcRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = match self.shipment.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(pick_up) = self.pick_up {
            errors.one_of("pick_up", &pick_up, &[0, 1]);
        }
        errors.into_result()
    }
}

pub struct Rates<'a> {
    client: &'a Client,
}

impl<'a> Rates<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn calc(&self, request: &RateCalcRequest) -> Result<RateCalcResult> {
        request.validate()?;
        let result: Option<RateCalcResult> = self.client.call(PATH_RATES, Some(request)).await?;
        Ok(result.unwrap_or_default())
    }
}
