//! Endpoint tests driving a live server over HTTP.
//!
//! Every test spawns its own server on an ephemeral port, so tests run
//! in parallel without sharing device state.

use std::net::SocketAddr;

use serde_json::{Value, json};

use ofs_server::config::{DEFAULT_API_KEY, MockHookPolicy, ServerConfig};
use ofs_server::routes;
use ofs_server::state::AppState;

const PIN: &str = "4321";

async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let state = AppState::new(&config);
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

async fn spawn_default() -> SocketAddr {
    spawn_server(ServerConfig::new()).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn submit_pin(address: SocketAddr, candidate: &str) -> String {
    let response = client()
        .post(format!("http://{address}/api/pin"))
        .bearer_auth(DEFAULT_API_KEY)
        .header("Content-Type", "text/plain")
        .body(candidate.to_owned())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    response.text().await.unwrap()
}

async fn attention_status(address: SocketAddr) -> u16 {
    client()
        .get(format!("http://{address}/api/attention"))
        .bearer_auth(DEFAULT_API_KEY)
        .send()
        .await
        .unwrap()
        .status()
        .as_u16()
}

fn invoice_payload(items: Value) -> Value {
    json!({
        "invoiceRequest": {
            "invoiceType": "Normal",
            "transactionType": "Sale",
            "payment": [{"amount": 100.0, "paymentType": "Cash"}],
            "items": items,
            "cashier": "Tester"
        }
    })
}

#[tokio::test]
async fn root_healthcheck() {
    let address = spawn_default().await;

    let response = client()
        .get(format!("http://{address}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "I am OFS mock server");
}

#[tokio::test]
async fn attention_requires_a_valid_api_key() {
    let address = spawn_server(ServerConfig::new().available(true)).await;

    let ok = client()
        .get(format!("http://{address}/api/attention"))
        .bearer_auth(DEFAULT_API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);

    let bad = client()
        .get(format!("http://{address}/api/attention"))
        .bearer_auth("bad-token")
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 401);

    let missing = client()
        .get(format!("http://{address}/api/attention"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 401);
}

#[tokio::test]
async fn status_structure_and_compatibility() {
    let address = spawn_default().await;

    let response = client()
        .get(format!("http://{address}/api/status"))
        .bearer_auth(DEFAULT_API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let status: Value = response.json().await.unwrap();
    // GSC field kept for backward compatibility.
    assert!(!status["gsc"].as_array().unwrap().is_empty());
    assert!(!status["deviceSerialNumber"].as_str().unwrap().is_empty());
    assert_eq!(status["protocolVersion"], "2.0");
}

#[tokio::test]
async fn pin_endpoint_answers_plain_text_codes() {
    let address = spawn_default().await;

    assert_eq!(submit_pin(address, PIN).await, "0100");
    assert_eq!(submit_pin(address, "12").await, "2800");
    assert_eq!(submit_pin(address, "9999").await, "2400");
}

#[tokio::test]
async fn pin_requires_a_valid_api_key() {
    let address = spawn_default().await;

    let response = client()
        .post(format!("http://{address}/api/pin"))
        .bearer_auth("bad-token")
        .body(PIN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn invoice_total_is_the_sum_of_items() {
    let address = spawn_default().await;

    let payload = invoice_payload(json!([
        {
            "name": "Test Product",
            "gtin": "12345678",
            "labels": ["F"],
            "totalAmount": 60.0,
            "unitPrice": 30.0,
            "quantity": 2.0
        },
        {
            "name": "Another",
            "gtin": "87654321",
            "labels": ["F"],
            "totalAmount": 40.0,
            "unitPrice": 20.0,
            "quantity": 2.0
        }
    ]));

    let response = client()
        .post(format!("http://{address}/api/invoices"))
        .bearer_auth(DEFAULT_API_KEY)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let invoice: Value = response.json().await.unwrap();
    assert_eq!(invoice["totalAmount"], 100.0);
    assert!(
        invoice["invoiceNumber"]
            .as_str()
            .unwrap()
            .starts_with("AX4F7Y5L-BX4F7Y5L-")
    );
}

#[tokio::test]
async fn invoice_item_without_gtin_reports_an_error_body() {
    let address = spawn_default().await;

    let payload = invoice_payload(json!([
        {
            "name": "Bez koda",
            "labels": ["F"],
            "totalAmount": 60.0,
            "unitPrice": 30.0,
            "quantity": 2.0
        }
    ]));

    let response = client()
        .post(format!("http://{address}/api/invoices"))
        .bearer_auth(DEFAULT_API_KEY)
        .json(&payload)
        .send()
        .await
        .unwrap();

    // Business failure: HTTP 200 with the error inside the body.
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "gtin za artikal Bez koda nije popunjen");
    assert_eq!(body["statusCode"], -1);
}

#[tokio::test]
async fn copy_invoice_without_referent_fields_is_rejected() {
    let address = spawn_default().await;

    let mut payload = invoice_payload(json!([
        {
            "name": "Artikl 1",
            "gtin": "12345678",
            "labels": ["F"],
            "totalAmount": 100.0,
            "unitPrice": 50.0,
            "quantity": 2.0
        }
    ]));
    payload["invoiceRequest"]["invoiceType"] = json!("Copy");

    let response = client()
        .post(format!("http://{address}/api/invoices"))
        .bearer_auth(DEFAULT_API_KEY)
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn copy_invoice_with_referent_fields_is_issued() {
    let address = spawn_default().await;

    let mut payload = invoice_payload(json!([
        {
            "name": "Artikl 1",
            "gtin": "12345678",
            "labels": ["F"],
            "totalAmount": 100.0,
            "unitPrice": 50.0,
            "quantity": 2.0
        }
    ]));
    payload["invoiceRequest"]["invoiceType"] = json!("Copy");
    payload["invoiceRequest"]["referentDocumentNumber"] = json!("RX4F7Y5L-RX4F7Y5L-138");
    payload["invoiceRequest"]["referentDocumentDT"] = json!("2024-03-12T07:47:09.548+01:00");

    let response = client()
        .post(format!("http://{address}/api/invoices"))
        .bearer_auth(DEFAULT_API_KEY)
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let invoice: Value = response.json().await.unwrap();
    assert!(
        invoice["journal"]
            .as_str()
            .unwrap()
            .contains("KOPIJA FISKALNOG RAČUNA")
    );
}

#[tokio::test]
async fn injected_fault_fails_every_issuance() {
    let config = ServerConfig::new().invoice_fault("Out of paper:-10".parse().unwrap());
    let address = spawn_server(config).await;

    let payload = invoice_payload(json!([
        {
            "name": "Artikl 1",
            "gtin": "12345678",
            "labels": ["F"],
            "totalAmount": 100.0,
            "unitPrice": 50.0,
            "quantity": 2.0
        }
    ]));

    let response = client()
        .post(format!("http://{address}/api/invoices"))
        .bearer_auth(DEFAULT_API_KEY)
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Out of paper");
    assert_eq!(body["statusCode"], -10);
}

#[tokio::test]
async fn invoice_search_returns_the_fixed_sample() {
    let address = spawn_default().await;

    let response = client()
        .post(format!("http://{address}/api/invoices/search"))
        .bearer_auth(DEFAULT_API_KEY)
        .json(&json!({
            "fromDate": "2024-03-01",
            "toDate": "2024-03-31",
            "amountFrom": 0,
            "amountTo": 100000,
            "invoiceTypes": ["Normal"],
            "transactionTypes": ["Sale"],
            "paymentTypes": ["Cash"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("RX4F7Y5L"));
}

#[tokio::test]
async fn invoice_retrieval_echoes_the_number() {
    let address = spawn_default().await;

    let ok = client()
        .get(format!("http://{address}/api/invoices/RX4F7Y5L-RX4F7Y5L-138"))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
    let record: Value = ok.json().await.unwrap();
    assert_eq!(
        record["invoiceResponse"]["invoiceNumber"],
        "RX4F7Y5L-RX4F7Y5L-138"
    );

    let err = client()
        .get(format!("http://{address}/api/invoices/ERROR"))
        .send()
        .await
        .unwrap();
    assert_eq!(err.status(), 200);
    assert_eq!(err.json::<Value>().await.unwrap(), json!({ "error": 1 }));
}

#[tokio::test]
async fn lock_then_pin_cycle_restores_availability() {
    let address = spawn_server(ServerConfig::new().available(true)).await;

    // Force the PIN-required state.
    let lock = client()
        .post(format!("http://{address}/mock/lock"))
        .send()
        .await
        .unwrap();
    assert_eq!(lock.status(), 200);
    let body: Value = lock.json().await.unwrap();
    assert_eq!(body["current_api_attention"], 404);

    assert_eq!(attention_status(address).await, 404);

    // A correct PIN brings the service back.
    assert_eq!(submit_pin(address, PIN).await, "0100");
    assert_eq!(attention_status(address).await, 200);
}

#[tokio::test]
async fn wrong_pin_does_not_unlock() {
    let address = spawn_default().await;

    assert_eq!(submit_pin(address, "9999").await, "2400");
    assert_eq!(attention_status(address).await, 404);
}

#[tokio::test]
async fn third_wrong_pin_locks_the_device_out() {
    let address = spawn_default().await;

    assert_eq!(submit_pin(address, "0000").await, "2400");
    assert_eq!(attention_status(address).await, 404);

    assert_eq!(submit_pin(address, "1111").await, "2400");
    assert_eq!(attention_status(address).await, 404);

    assert_eq!(submit_pin(address, "2222").await, "1300");
    assert_eq!(attention_status(address).await, 404);

    // Locked out: even the correct PIN is swallowed.
    assert_eq!(submit_pin(address, PIN).await, "1300");
    assert_eq!(attention_status(address).await, 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_wrong_pins_are_all_counted() {
    let address = spawn_default().await;

    // Three wrong submissions in flight at once. The device mutex
    // serializes them, so whatever the interleaving, every one is
    // counted and exactly one of them observes the lockout.
    let (first, second, third) = tokio::join!(
        submit_pin(address, "0000"),
        submit_pin(address, "1111"),
        submit_pin(address, "2222"),
    );

    let mut codes = [first, second, third];
    codes.sort();
    assert_eq!(codes, ["1300", "2400", "2400"]);

    // The device ends locked out either way.
    assert_eq!(submit_pin(address, PIN).await, "1300");
    assert_eq!(attention_status(address).await, 404);
}

#[tokio::test]
async fn bad_format_does_not_count_as_an_attempt() {
    let address = spawn_default().await;

    assert_eq!(submit_pin(address, "12").await, "2800");
    assert_eq!(submit_pin(address, "12").await, "2800");
    assert_eq!(submit_pin(address, "12").await, "2800");

    // No lockout happened, the correct PIN still unlocks.
    assert_eq!(submit_pin(address, PIN).await, "0100");
}

#[tokio::test]
async fn unlock_hook_restores_the_probe() {
    let address = spawn_default().await;
    assert_eq!(attention_status(address).await, 404);

    let unlock = client()
        .get(format!("http://{address}/mock/unlock"))
        .send()
        .await
        .unwrap();
    assert_eq!(unlock.status(), 200);
    let body: Value = unlock.json().await.unwrap();
    assert_eq!(body["current_api_attention"], 200);

    assert_eq!(attention_status(address).await, 200);
}

#[tokio::test]
async fn current_attention_hook_reports_the_code() {
    let address = spawn_default().await;

    let code: u16 = client()
        .get(format!("http://{address}/mock/current_api_attention"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(code, 404);

    client()
        .post(format!("http://{address}/mock/unlock"))
        .send()
        .await
        .unwrap();

    let code: u16 = client()
        .get(format!("http://{address}/mock/current_api_attention"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(code, 200);
}

#[tokio::test]
async fn secured_hooks_require_the_bearer_key() {
    let config = ServerConfig::new().hook_policy(MockHookPolicy::Bearer);
    let address = spawn_server(config).await;

    let unauthenticated = client()
        .post(format!("http://{address}/mock/lock"))
        .send()
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), 401);

    let authenticated = client()
        .post(format!("http://{address}/mock/lock"))
        .bearer_auth(DEFAULT_API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(authenticated.status(), 200);

    // Introspection stays open under either policy.
    let code = client()
        .get(format!("http://{address}/mock/current_api_attention"))
        .send()
        .await
        .unwrap();
    assert_eq!(code.status(), 200);
}

#[tokio::test]
async fn lock_hook_clears_a_lockout() {
    let address = spawn_default().await;

    for _ in 0..3 {
        submit_pin(address, "0000").await;
    }
    assert_eq!(submit_pin(address, PIN).await, "1300");

    // The lock hook resets the failure counter, so the device becomes
    // retryable again while still unavailable.
    client()
        .post(format!("http://{address}/mock/lock"))
        .send()
        .await
        .unwrap();

    assert_eq!(attention_status(address).await, 404);
    assert_eq!(submit_pin(address, PIN).await, "0100");
    assert_eq!(attention_status(address).await, 200);
}

#[tokio::test]
async fn custom_api_key_replaces_the_default() {
    let config = ServerConfig::new().api_key("my_custom_key_123").available(true);
    let address = spawn_server(config).await;

    let with_default = client()
        .get(format!("http://{address}/api/attention"))
        .bearer_auth(DEFAULT_API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(with_default.status(), 401);

    let with_custom = client()
        .get(format!("http://{address}/api/attention"))
        .bearer_auth("my_custom_key_123")
        .send()
        .await
        .unwrap();
    assert_eq!(with_custom.status(), 200);
}
