//! System message endpoints

use crate::client::TapiClient;
use crate::error::TapiResult;
use mercado_types::{FormParams, MessageLevel};
use serde_json::Value;
use tracing::{debug, instrument};

/// System message endpoints
///
/// Messages announce TAPI bugs, fixes, scheduled maintenance and new versions.
pub struct SystemEndpoints<'a> {
    client: &'a TapiClient,
}

impl<'a> SystemEndpoints<'a> {
    pub fn new(client: &'a TapiClient) -> Self {
        Self { client }
    }

    /// List system messages
    ///
    /// # Arguments
    /// * `level` - Only return messages of this severity (optional)
    ///
    /// # Returns
    /// The `messages` array
    #[instrument(skip(self))]
    pub async fn list_system_messages(&self, level: Option<MessageLevel>) -> TapiResult<Value> {
        let mut params = FormParams::new();
        params.push_opt("level", level);

        debug!("Listing system messages");
        self.client
            .execute("list_system_messages", params, Some("messages"))
            .await
    }
}
