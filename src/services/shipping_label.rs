use crate::client::Client;
use crate::entity::shipping_label::ShippingLabel;
use crate::error::Result;
use crate::services::order::OrderReference;
use crate::utils::constants::PATH_LABEL;
use crate::validation::Validate;

pub type ShippingLabelRequest = OrderReference;

pub struct ShippingLabels<'a> {
    client: &'a Client,
}

impl<'a> ShippingLabels<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn detail(&self, request: &ShippingLabelRequest) -> Result<ShippingLabel> {
        request.validate()?;
        let label: Option<ShippingLabel> = self.client.call(PATH_LABEL, Some(request)).await?;
        Ok(label.unwrap_or_default())
    }
}
