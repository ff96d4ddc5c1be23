use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::resource::{ESTIMATED_ACTUALS, FORECASTS, ResourceKind, build_path};

/// A weather site (irradiance and weather data for a fixed location).
#[derive(Debug, Clone)]
pub struct WeatherSite {
    client: Client,
    resource_id: String,
}

impl WeatherSite {
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

    pub fn get_forecasts(&self) -> Result<Value> {
        let path = build_path(ResourceKind::WeatherSite, &self.resource_id, FORECASTS);
        self.client.get(&path, None, None)
    }

    pub fn get_estimated_actuals(&self) -> Result<Value> {
        let path = build_path(ResourceKind::WeatherSite, &self.resource_id, ESTIMATED_ACTUALS);
        self.client.get(&path, None, None)
    }
}
