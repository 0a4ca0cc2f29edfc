use serde_json::Value;

use crate::client::Client;
use crate::entity::user::UserInfo;
use crate::error::Result;
use crate::utils::constants::PATH_USER_INFO;

pub struct Users<'a> {
    client: &'a Client,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Account code, balance, enabled products and registered senders.
    pub async fn info(&self) -> Result<UserInfo> {
        let info: Option<UserInfo> = self.client.call::<Value, _>(PATH_USER_INFO, None).await?;
        Ok(info.unwrap_or_default())
    }
}
