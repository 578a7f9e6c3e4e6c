//! Account endpoints

use crate::client::TapiClient;
use crate::error::TapiResult;
use mercado_types::FormParams;
use serde_json::Value;
use tracing::instrument;

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a TapiClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a TapiClient) -> Self {
        Self { client }
    }

    /// Get account information
    ///
    /// Balances per coin (total and available after open-order holds), open
    /// order counts per digital coin, and withdrawal/transfer limits.
    #[instrument(skip(self))]
    pub async fn get_account_info(&self) -> TapiResult<Value> {
        self.client
            .execute("get_account_info", FormParams::new(), None)
            .await
    }
}
