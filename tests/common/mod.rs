//! Shared fixtures for the wiremock-backed tests.
//!
//! The client is blocking, so every call runs on `spawn_blocking` while the
//! mock server keeps serving on the async runtime.

#![allow(dead_code)]

use serde_json::{Value, json};
use solcast::{Client, ClientConfig};
use std::time::Duration;

pub const API_KEY: &str = "12345";
pub const RESOURCE_ID: &str = "1234-1234";

/// Client pointed at the mock server.
pub fn test_client(uri: &str) -> Client {
    let cfg = ClientConfig::new(API_KEY)
        .with_url(uri)
        .with_timeout(Duration::from_secs(5));
    #[allow(clippy::expect_used)]
    Client::new(cfg).expect("Failed to create client")
}

pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

pub fn rooftop_forecasts() -> Value {
    json!({
        "forecasts": [
            {
                "pv_estimate": "9.5",
                "pv_estimate10": "6",
                "pv_estimate90": "13.8",
                "period_end": "2018-01-01T01:00:00.00000Z",
                "period": "PT30M"
            },
            {
                "pv_estimate": "10",
                "pv_estimate10": "8",
                "pv_estimate90": "12",
                "period_end": "2018-01-01T12:30:00.00000Z",
                "period": "PT30M"
            }
        ]
    })
}

pub fn estimated_actuals() -> Value {
    json!({
        "estimated_actuals": [
            {
                "pv_estimate": 0.0,
                "period_end": "2018-01-02T08:00:00.0000000Z",
                "period": "PT30M"
            },
            {
                "pv_estimate": 0.0156,
                "period_end": "2018-01-02T07:30:00.0000000Z",
                "period": "PT30M"
            }
        ]
    })
}

pub fn radiation_forecasts() -> Value {
    json!({
        "forecasts": [
            {
                "ghi": 690,
                "ghi90": 802,
                "ghi10": 537,
                "period_end": "2017-01-30T05:00:00.0000000Z",
                "period": "PT30M"
            },
            {
                "ghi": 422,
                "ghi90": 707,
                "ghi10": 141,
                "period_end": "2017-01-30T05:30:00.0000000Z",
                "period": "PT30M"
            }
        ]
    })
}

pub fn measurement_single() -> Value {
    json!({
        "measurement": {
            "period_end": "2018-02-02T03:30:00.0000000Z",
            "period": "PT5M",
            "total_power": 1.23456
        }
    })
}
