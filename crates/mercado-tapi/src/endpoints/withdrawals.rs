//! Withdrawal endpoints
//!
//! Real withdrawals go to a bank account; Bitcoin and Litecoin transfers go
//! to an address. Both destinations must already be marked as trusted on the
//! exchange, which requires two-factor authentication and a security PIN.

use crate::client::TapiClient;
use crate::error::TapiResult;
use mercado_types::{Coin, FormParams};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

/// Withdrawal endpoints
pub struct WithdrawalEndpoints<'a> {
    client: &'a TapiClient,
}

impl<'a> WithdrawalEndpoints<'a> {
    pub fn new(client: &'a TapiClient) -> Self {
        Self { client }
    }

    /// Get a transfer or withdrawal
    ///
    /// # Arguments
    /// * `coin` - Coin the withdrawal was made in
    /// * `withdrawal_id` - Identifier, unique per coin
    ///
    /// # Returns
    /// The `order` object (the API's name for the withdrawal record)
    #[instrument(skip(self))]
    pub async fn get_withdrawal(&self, coin: Coin, withdrawal_id: u64) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("coin", coin)
            .with("withdrawal_id", withdrawal_id);
        self.client.execute("get_withdrawal", params, Some("order")).await
    }

    /// Withdraw Real
    ///
    /// # Arguments
    /// * `quantity` - Gross amount; fees are taken from it
    /// * `account_ref` - Id of a trusted bank account
    /// * `description` - Free text (optional)
    #[instrument(skip(self))]
    pub async fn withdraw_coin_brl(
        &self,
        quantity: Decimal,
        account_ref: &str,
        description: Option<&str>,
    ) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("quantity", quantity)
            .with("account_ref", account_ref);
        self.withdraw_coin(Coin::Brl, description, params).await
    }

    /// Transfer Bitcoin
    ///
    /// # Arguments
    /// * `address` - Trusted Bitcoin address
    /// * `quantity` - Net amount to transfer
    /// * `tx_fee` - Miner fee
    /// * `tx_aggregate` - Allow batching with other transfers (default `true`)
    /// * `via_blockchain` - Force an on-chain transaction even to a Mercado
    ///   Bitcoin address (default `false`)
    /// * `description` - Free text (optional)
    #[instrument(skip(self))]
    pub async fn withdraw_coin_btc(
        &self,
        address: &str,
        quantity: Decimal,
        tx_fee: Decimal,
        tx_aggregate: Option<bool>,
        via_blockchain: Option<bool>,
        description: Option<&str>,
    ) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("address", address)
            .with("quantity", quantity)
            .with("tx_fee", tx_fee)
            .with("tx_aggregate", tx_aggregate.unwrap_or(true))
            .with("via_blockchain", via_blockchain.unwrap_or(false));
        self.withdraw_coin(Coin::Btc, description, params).await
    }

    /// Transfer Litecoin
    ///
    /// # Arguments
    /// * `address` - Trusted Litecoin address
    /// * `quantity` - Net amount to transfer
    /// * `description` - Free text (optional)
    #[instrument(skip(self))]
    pub async fn withdraw_coin_ltc(
        &self,
        address: &str,
        quantity: Decimal,
        description: Option<&str>,
    ) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("address", address)
            .with("quantity", quantity);
        self.withdraw_coin(Coin::Ltc, description, params).await
    }

    async fn withdraw_coin(
        &self,
        coin: Coin,
        description: Option<&str>,
        mut params: FormParams,
    ) -> TapiResult<Value> {
        params.push("coin", coin);
        params.push_opt("description", description.filter(|d| !d.is_empty()));

        debug!("Requesting {} withdrawal", coin);
        self.client.execute("withdraw_coin", params, Some("order")).await
    }
}
