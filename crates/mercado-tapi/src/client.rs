//! Main Trade API client implementation

use crate::endpoints::{AccountEndpoints, SystemEndpoints, TradingEndpoints, WithdrawalEndpoints};
use crate::error::{TapiError, TapiResult};
use crate::transport::{HttpTransport, SignedRequest, Transport};
use mercado_auth::{Credentials, NonceGenerator, RequestSigner};
use mercado_types::{Coin, CoinPair, Envelope, FormParams, InvalidArgument, MessageLevel};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Production host
pub const DEFAULT_BASE_URL: &str = "https://www.mercadobitcoin.com.br";

/// Path every Trade API v3 request is posted (and signed) against
pub const REQUEST_PATH: &str = "/tapi/v3/";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("mercado-tapi/", env!("CARGO_PKG_VERSION"));

/// Mercado Bitcoin Trade API client
///
/// Every operation signs one request, sends it once and unwraps the response
/// envelope. Clones share the nonce counter, so a client can be cloned or put
/// behind an `Arc` and used from many tasks with the same credentials.
///
/// # Example
///
/// ```no_run
/// use mercado_tapi::{CoinPair, TapiClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TapiClient::new("my-tapi-id", "my-tapi-secret")?;
///
///     let account = client.get_account_info().await?;
///     println!("{}", serde_json::to_string_pretty(&account)?);
///
///     let orders = client.list_orders(CoinPair::BrlBtc).await?;
///     println!("{}", serde_json::to_string_pretty(&orders)?);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TapiClient {
    credentials: Credentials,
    nonces: Arc<NonceGenerator>,
    transport: Arc<dyn Transport>,
}

impl TapiClient {
    /// Create a client for the production API
    ///
    /// No network I/O happens here.
    pub fn new(tapi_id: impl Into<String>, secret: impl AsRef<str>) -> TapiResult<Self> {
        let credentials = Credentials::new(tapi_id, secret)?;
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client from `MB_TAPI_ID` / `MB_TAPI_SECRET`
    pub fn from_env() -> TapiResult<Self> {
        let credentials = Credentials::from_env()?;
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> TapiResult<Self> {
        let credentials = config.credentials.ok_or(TapiError::AuthRequired)?;
        let transport = HttpTransport::new(
            config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;
        let nonces = nonce_source(config.nonce_floor);

        info!("Created Mercado Bitcoin TAPI client");

        Ok(Self {
            credentials,
            nonces,
            transport: Arc::new(transport),
        })
    }

    /// Create a client that delivers requests through a custom transport
    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            nonces: nonce_source(None),
            transport,
        }
    }

    /// Resume nonces above a previously persisted value
    ///
    /// Same guard as [`ClientConfig::with_nonce_floor`] for clients built with
    /// [`with_transport`](Self::with_transport). Replaces the nonce counter, so
    /// call it before cloning the client.
    pub fn with_nonce_floor(mut self, last_nonce: u64) -> Self {
        self.nonces = nonce_source(Some(last_nonce));
        self
    }

    /// Get the TAPI identifier requests are sent under
    pub fn tapi_id(&self) -> &str {
        self.credentials.tapi_id()
    }

    /// Last nonce issued by this client
    ///
    /// Persist this across restarts and pass it to
    /// [`ClientConfig::with_nonce_floor`] to guard against clock rollback.
    pub fn last_nonce(&self) -> u64 {
        self.nonces.last_issued()
    }

    // ========================================================================
    // Signed request primitive
    // ========================================================================

    /// Call any Trade API method with free-form parameters
    ///
    /// Values must be strings, numbers or booleans; `tapi_method` and
    /// `tapi_nonce` are injected and may not be supplied. Returns the whole
    /// `response_data` object.
    pub async fn call(&self, method: &str, params: Map<String, Value>) -> TapiResult<Value> {
        let params = FormParams::from_json_map(&params)?;
        self.execute(method, params, None).await
    }

    /// Like [`call`](Self::call), returning only `response_data[sub_key]`
    pub async fn call_field(
        &self,
        method: &str,
        params: Map<String, Value>,
        sub_key: &str,
    ) -> TapiResult<Value> {
        let params = FormParams::from_json_map(&params)?;
        self.execute(method, params, Some(sub_key)).await
    }

    /// Sign, send and unwrap one request
    pub(crate) async fn execute(
        &self,
        method: &str,
        mut params: FormParams,
        sub_key: Option<&str>,
    ) -> TapiResult<Value> {
        validate_method(method)?;
        params.ensure_no_reserved()?;

        let signer = RequestSigner::new(&self.credentials, REQUEST_PATH, self.nonces.next()?);
        params.push("tapi_method", method);
        params.push("tapi_nonce", signer.nonce());

        // Encoded once: the signed bytes are the sent bytes
        let body = params.encode()?;
        let request = SignedRequest {
            path: REQUEST_PATH.to_string(),
            tapi_id: signer.tapi_id().to_string(),
            signature: signer.sign(&body),
            body,
        };

        debug!(method, nonce = signer.nonce(), "Making authenticated request");

        let response = self.transport.send(&request).await?;
        let envelope = Envelope::from_json(&response.body).map_err(|e| {
            TapiError::Protocol(format!(
                "HTTP {}: response is not a valid envelope: {}",
                response.status, e
            ))
        })?;

        envelope.into_payload(sub_key).map_err(|e| {
            let err = TapiError::from(e);
            warn!(method, error = %err, "Trade API request failed");
            err
        })
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Get system message endpoints
    pub fn system(&self) -> SystemEndpoints<'_> {
        SystemEndpoints::new(self)
    }

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    /// Get withdrawal endpoints
    pub fn withdrawals(&self) -> WithdrawalEndpoints<'_> {
        WithdrawalEndpoints::new(self)
    }

    // ========================================================================
    // Operation catalog
    // ========================================================================

    /// List TAPI system messages, optionally filtered by level
    pub async fn list_system_messages(&self, level: Option<MessageLevel>) -> TapiResult<Value> {
        self.system().list_system_messages(level).await
    }

    /// Get balances, withdrawal limits and open order counts
    pub async fn get_account_info(&self) -> TapiResult<Value> {
        self.account().get_account_info().await
    }

    /// List up to 200 of the account's orders for a pair
    pub async fn list_orders(&self, coin_pair: CoinPair) -> TapiResult<Value> {
        self.trading().list_orders(coin_pair).await
    }

    /// Get one order, including its executed operations
    pub async fn get_order(&self, coin_pair: CoinPair, order_id: u64) -> TapiResult<Value> {
        self.trading().get_order(coin_pair, order_id).await
    }

    /// Get the private orderbook for a pair
    pub async fn list_orderbook(&self, coin_pair: CoinPair, full: Option<bool>) -> TapiResult<Value> {
        self.trading().list_orderbook(coin_pair, full).await
    }

    /// Place a limit buy order
    pub async fn place_buy_order(
        &self,
        coin_pair: CoinPair,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> TapiResult<Value> {
        self.trading()
            .place_buy_order(coin_pair, quantity, limit_price)
            .await
    }

    /// Place a limit sell order
    pub async fn place_sell_order(
        &self,
        coin_pair: CoinPair,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> TapiResult<Value> {
        self.trading()
            .place_sell_order(coin_pair, quantity, limit_price)
            .await
    }

    /// Cancel an open order
    pub async fn cancel_order(&self, coin_pair: CoinPair, order_id: u64) -> TapiResult<Value> {
        self.trading().cancel_order(coin_pair, order_id).await
    }

    /// Get a coin transfer or Real withdrawal
    pub async fn get_withdrawal(&self, coin: Coin, withdrawal_id: u64) -> TapiResult<Value> {
        self.withdrawals().get_withdrawal(coin, withdrawal_id).await
    }

    /// Withdraw Real to a trusted bank account
    pub async fn withdraw_coin_brl(
        &self,
        quantity: Decimal,
        account_ref: &str,
        description: Option<&str>,
    ) -> TapiResult<Value> {
        self.withdrawals()
            .withdraw_coin_brl(quantity, account_ref, description)
            .await
    }

    /// Transfer Bitcoin to a trusted address
    pub async fn withdraw_coin_btc(
        &self,
        address: &str,
        quantity: Decimal,
        tx_fee: Decimal,
        tx_aggregate: Option<bool>,
        via_blockchain: Option<bool>,
        description: Option<&str>,
    ) -> TapiResult<Value> {
        self.withdrawals()
            .withdraw_coin_btc(address, quantity, tx_fee, tx_aggregate, via_blockchain, description)
            .await
    }

    /// Transfer Litecoin to a trusted address
    pub async fn withdraw_coin_ltc(
        &self,
        address: &str,
        quantity: Decimal,
        description: Option<&str>,
    ) -> TapiResult<Value> {
        self.withdrawals()
            .withdraw_coin_ltc(address, quantity, description)
            .await
    }
}

impl std::fmt::Debug for TapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapiClient")
            .field("credentials", &self.credentials)
            .field("last_nonce", &self.last_nonce())
            .finish()
    }
}

fn nonce_source(floor: Option<u64>) -> Arc<NonceGenerator> {
    Arc::new(match floor {
        Some(floor) => NonceGenerator::starting_after(floor),
        None => NonceGenerator::new(),
    })
}

/// Method names are lowercase snake case, e.g. `list_orders`
fn validate_method(method: &str) -> Result<(), InvalidArgument> {
    if method.is_empty() {
        return Err(InvalidArgument::new("tapi_method", "method name is empty"));
    }
    if !method
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(InvalidArgument::new(
            "tapi_method",
            format!("`{}` is not a valid method name", method),
        ));
    }
    Ok(())
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials
    pub credentials: Option<Credentials>,
    /// Scheme and host requests are sent to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// First nonce issued will be greater than this
    pub nonce_floor: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            nonce_floor: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Point the client at another host (e.g. a local mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Resume nonces above a previously persisted value
    pub fn with_nonce_floor(mut self, last_nonce: u64) -> Self {
        self.nonce_floor = Some(last_nonce);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://127.0.0.1:8080")
            .with_nonce_floor(1_000);

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.nonce_floor, Some(1_000));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_auth_required_error() {
        let result = TapiClient::with_config(ClientConfig::new());
        assert!(matches!(result, Err(TapiError::AuthRequired)));
    }

    #[test]
    fn test_invalid_credentials_rejected() {
        let result = TapiClient::new("", "secret");
        assert!(matches!(result, Err(TapiError::Auth(_))));
    }

    #[test]
    fn test_nonce_floor_applied() {
        let creds = Credentials::new("tapi-id", "secret").unwrap();
        let client = TapiClient::with_config(
            ClientConfig::new()
                .with_credentials(creds)
                .with_nonce_floor(4_000_000_000_000),
        )
        .unwrap();
        assert_eq!(client.last_nonce(), 4_000_000_000_000);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = TapiClient::new("tapi-id", "do-not-print").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("do-not-print"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_validate_method() {
        assert!(validate_method("list_orders").is_ok());
        assert!(validate_method("").is_err());
        assert!(validate_method("list orders").is_err());
        assert!(validate_method("List_Orders").is_err());
    }
}
