use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::resource::{ESTIMATED_ACTUALS, FORECASTS, MEASUREMENTS, ResourceKind, build_path};
use crate::timestamps::{ParsedPayload, parse_periods};
use crate::util::Params;

const KIND: ResourceKind = ResourceKind::RooftopSite;

/// A rooftop PV site.
///
/// See <https://docs.solcast.com.au/> for the available query parameters
/// (`hours`, `period`, ...).
#[derive(Debug, Clone)]
pub struct RooftopSite {
    client: Client,
    resource_id: String,
}

impl RooftopSite {
    pub fn new(api_key: impl Into<String>, resource_id: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(Client::with_key(api_key)?, resource_id))
    }

    pub fn with_client(client: Client, resource_id: impl Into<String>) -> Self {
        Self {
            client,
            resource_id: resource_id.into(),
        }
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self, endpoint: &str) -> String {
        build_path(KIND, &self.resource_id, endpoint)
    }

    /// Forecasts for the site, as returned by the API.
    pub fn get_forecasts(&self, params: Option<&Params>) -> Result<Value> {
        self.client.get(&self.path(FORECASTS), params, None)
    }

    /// Forecasts with `period_end` parsed to timestamps and `period` to
    /// durations.
    pub fn get_forecasts_parsed(&self, params: Option<&Params>) -> Result<ParsedPayload> {
        let forecasts = self.get_forecasts(params)?;
        parse_periods(forecasts, FORECASTS)
    }

    pub fn get_estimated_actuals(&self, params: Option<&Params>) -> Result<Value> {
        self.client.get(&self.path(ESTIMATED_ACTUALS), params, None)
    }

    /// Uploads measured production. See [`crate::Measurements`] for the
    /// expected body; the API echoes the accepted data back.
    ///
    /// Never retried, since a repeated upload is not idempotent.
    pub fn post_measurements<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.client.post(&self.path(MEASUREMENTS), data, None)
    }
}
