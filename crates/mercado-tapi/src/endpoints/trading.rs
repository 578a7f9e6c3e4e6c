//! Trading endpoints for order management

use crate::client::TapiClient;
use crate::error::TapiResult;
use mercado_types::{CoinPair, FormParams, OrderSide};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

/// Trading endpoints for order management
///
/// Only orders owned by the credential's account are visible.
pub struct TradingEndpoints<'a> {
    client: &'a TapiClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a TapiClient) -> Self {
        Self { client }
    }

    /// List orders
    ///
    /// Up to 200 orders for the pair, most recently updated first, each with
    /// its executed operations. Empty list when nothing matches.
    ///
    /// # Returns
    /// The `orders` array
    #[instrument(skip(self))]
    pub async fn list_orders(&self, coin_pair: CoinPair) -> TapiResult<Value> {
        let params = FormParams::new().with("coin_pair", coin_pair);
        debug!("Listing orders for {}", coin_pair);
        self.client.execute("list_orders", params, Some("orders")).await
    }

    /// Get a single order
    ///
    /// # Arguments
    /// * `coin_pair` - Pair the order was placed on
    /// * `order_id` - Order identifier
    ///
    /// # Returns
    /// The `order` object
    #[instrument(skip(self))]
    pub async fn get_order(&self, coin_pair: CoinPair, order_id: u64) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("coin_pair", coin_pair)
            .with("order_id", order_id);
        self.client.execute("get_order", params, Some("order")).await
    }

    /// Get the private orderbook
    ///
    /// Unlike the public orderbook, orders at the same price are not grouped
    /// and `latest_order_id` is included.
    ///
    /// # Arguments
    /// * `coin_pair` - Pair to fetch
    /// * `full` - Return the whole book instead of the top (default `false`)
    ///
    /// # Returns
    /// The whole `response_data` object
    #[instrument(skip(self))]
    pub async fn list_orderbook(&self, coin_pair: CoinPair, full: Option<bool>) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("coin_pair", coin_pair)
            .with("full", full.unwrap_or(false));
        self.client.execute("list_orderbook", params, None).await
    }

    /// Place a limit buy (bid) order
    ///
    /// The order is matched against the book on creation, so the response
    /// tells whether it was (partially) filled and whether it is still open.
    pub async fn place_buy_order(
        &self,
        coin_pair: CoinPair,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> TapiResult<Value> {
        self.place_order(OrderSide::Buy, coin_pair, quantity, limit_price)
            .await
    }

    /// Place a limit sell (ask) order
    pub async fn place_sell_order(
        &self,
        coin_pair: CoinPair,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> TapiResult<Value> {
        self.place_order(OrderSide::Sell, coin_pair, quantity, limit_price)
            .await
    }

    #[instrument(skip(self))]
    async fn place_order(
        &self,
        side: OrderSide,
        coin_pair: CoinPair,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("coin_pair", coin_pair)
            .with("quantity", quantity)
            .with("limit_price", limit_price);

        debug!(
            "Placing {} order for {} {} at {}",
            side.as_str(),
            quantity,
            coin_pair,
            limit_price
        );

        self.client
            .execute(side.place_method(), params, Some("order"))
            .await
    }

    /// Cancel an order
    ///
    /// # Returns
    /// The `order` object with its updated status
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, coin_pair: CoinPair, order_id: u64) -> TapiResult<Value> {
        let params = FormParams::new()
            .with("coin_pair", coin_pair)
            .with("order_id", order_id);
        debug!("Cancelling order {}", order_id);
        self.client.execute("cancel_order", params, Some("order")).await
    }
}
