use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::resource::{
    ESTIMATED_ACTUALS, FORECASTS, MEASUREMENTS, RADIATION_ESTIMATED_ACTUALS, RADIATION_FORECASTS,
    ResourceKind, build_path,
};
use crate::util::params;

const KIND: ResourceKind = ResourceKind::UtilityScaleSite;

/// A utility-scale PV site.
///
/// Every GET takes `period`, the averaging period as an ISO-8601 duration
/// (`PT30M`), and `hours`, the number of hours of data to return.
#[derive(Debug, Clone)]
pub struct UtilitySite {
    client: Client,
    resource_id: String,
}

impl UtilitySite {
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

    pub fn get_forecasts(&self, period: &str, hours: &str) -> Result<Value> {
        self.get(FORECASTS, period, hours)
    }

    pub fn get_estimated_actuals(&self, period: &str, hours: &str) -> Result<Value> {
        self.get(ESTIMATED_ACTUALS, period, hours)
    }

    /// Irradiance forecasts (`weather/forecasts`).
    pub fn get_radiation_forecasts(&self, period: &str, hours: &str) -> Result<Value> {
        self.get(RADIATION_FORECASTS, period, hours)
    }

    /// Irradiance estimated actuals (`weather/estimated_actuals`).
    pub fn get_radiation_estimated_actuals(&self, period: &str, hours: &str) -> Result<Value> {
        self.get(RADIATION_ESTIMATED_ACTUALS, period, hours)
    }

    pub fn post_measurements<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        let path = build_path(KIND, &self.resource_id, MEASUREMENTS);
        self.client.post(&path, data, None)
    }

    fn get(&self, endpoint: &str, period: &str, hours: &str) -> Result<Value> {
        // The API expects these two names capitalized.
        let query = params([("Period", period), ("Hours", hours)]);
        let path = build_path(KIND, &self.resource_id, endpoint);
        self.client.get(&path, Some(&query), None)
    }
}
