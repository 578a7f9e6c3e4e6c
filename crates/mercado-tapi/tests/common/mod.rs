//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes documented for Trade API v3.

#![allow(dead_code)]

use async_trait::async_trait;
use mercado_tapi::{Credentials, SignedRequest, TapiClient, TapiResult, Transport, TransportResponse};
use std::sync::{Arc, Mutex};

pub const TEST_TAPI_ID: &str = "a6f1ed0a6d5d3c2b";
pub const TEST_SECRET: &str = "1ebda7d457ece1330dff1c9e04cd62c4e02d1835968ff89d2fb2339f06f73028";

/// Successful list_orders response
pub const ORDERS_RESPONSE: &str = r#"{
    "response_data": {
        "orders": [
            {
                "order_id": 3,
                "coin_pair": "BRLBTC",
                "order_type": 1,
                "status": 2,
                "has_fills": true,
                "quantity": "1.00000000",
                "limit_price": "900.00000",
                "executed_quantity": "1.00000000",
                "executed_price_avg": "900.00000",
                "fee": "0.00300000",
                "created_timestamp": "1453835329",
                "updated_timestamp": "1453835329",
                "operations": []
            },
            {
                "order_id": 1,
                "coin_pair": "BRLBTC",
                "order_type": 2,
                "status": 4,
                "has_fills": true,
                "quantity": "2.00000000",
                "limit_price": "900.00000",
                "executed_quantity": "2.00000000",
                "executed_price_avg": "900.00000",
                "fee": "6.30000",
                "created_timestamp": "1453835033",
                "updated_timestamp": "1453835033",
                "operations": []
            }
        ]
    },
    "status_code": 100,
    "server_unix_timestamp": "1453835329"
}"#;

/// Successful get_account_info response (keys deliberately not sorted)
pub const ACCOUNT_RESPONSE: &str = r#"{
    "response_data": {
        "balance": {
            "brl": {"available": "3000.00000", "total": "4900.00000"},
            "btc": {"available": "10.00000000", "total": "11.00000000", "amount_open_orders": 3},
            "ltc": {"available": "500.00000000", "total": "500.00000000", "amount_open_orders": 0}
        },
        "withdrawal_limits": {
            "brl": {"available": "988.00", "total": "20000.00"},
            "btc": {"available": "3.76", "total": "5.00"},
            "ltc": {"available": "500.00", "total": "500.00"}
        }
    },
    "status_code": 100
}"#;

/// Response carrying every sub-key the catalog extracts
pub const CATALOG_RESPONSE: &str = r#"{
    "status_code": 100,
    "response_data": {
        "messages": [{"msg_date": "1453827942", "level": "INFO", "event_code": 3001, "msg_content": "Nova versao"}],
        "orders": [],
        "order": {"order_id": 123, "status": 2},
        "orderbook": {"bids": [], "asks": [], "latest_order_id": 123}
    }
}"#;

pub const INVALID_NONCE_RESPONSE: &str = r#"{"status_code":200,"error_message":"Invalid nonce"}"#;

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_TAPI_ID, TEST_SECRET).unwrap()
}

type Responder = Box<dyn Fn(&SignedRequest) -> TapiResult<TransportResponse> + Send + Sync>;

/// Transport stub that records every request it is asked to send
pub struct RecordingTransport {
    requests: Mutex<Vec<SignedRequest>>,
    responder: Responder,
}

impl RecordingTransport {
    /// Reply to every request with HTTP 200 and `body`
    pub fn replying(body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::with_responder(move |_| {
            Ok(TransportResponse {
                status: 200,
                body: body.clone(),
            })
        })
    }

    /// Fail every request with the error built by `make_error`
    pub fn failing(make_error: fn() -> mercado_tapi::TapiError) -> Arc<Self> {
        Self::with_responder(move |_| Err(make_error()))
    }

    pub fn with_responder(
        responder: impl Fn(&SignedRequest) -> TapiResult<TransportResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Number of send attempts
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> SignedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &SignedRequest) -> TapiResult<TransportResponse> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

/// Client wired to a recording transport
pub fn client_with(transport: &Arc<RecordingTransport>) -> TapiClient {
    let transport: Arc<dyn Transport> = transport.clone();
    TapiClient::with_transport(test_credentials(), transport)
}

/// Decode a form body into ordered pairs
pub fn form_pairs(body: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(body).unwrap()
}

/// Form body without the injected `tapi_method` / `tapi_nonce`
pub fn caller_params(body: &str) -> Vec<(String, String)> {
    form_pairs(body)
        .into_iter()
        .filter(|(k, _)| k != "tapi_method" && k != "tapi_nonce")
        .collect()
}

pub fn field(body: &str, name: &str) -> Option<String> {
    form_pairs(body)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}

pub fn nonce_of(request: &SignedRequest) -> u64 {
    field(&request.body, "tapi_nonce").unwrap().parse().unwrap()
}

pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
