use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::resource::{ESTIMATED_ACTUALS, FORECASTS, ResourceKind, build_path};
use crate::util::Params;

/// World solar radiation data, addressed by coordinates instead of a site id.
#[derive(Debug, Clone)]
pub struct WorldRadiation {
    client: Client,
}

impl WorldRadiation {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(Client::with_key(api_key)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Forecasts for a location given in decimal degrees (EPSG:4326).
    ///
    /// `hours` limits the response window and is omitted when `None`.
    pub fn get_forecasts(
        &self,
        latitude: &str,
        longitude: &str,
        hours: Option<&str>,
    ) -> Result<Value> {
        self.get(FORECASTS, latitude, longitude, hours)
    }

    pub fn get_estimated_actuals(
        &self,
        latitude: &str,
        longitude: &str,
        hours: Option<&str>,
    ) -> Result<Value> {
        self.get(ESTIMATED_ACTUALS, latitude, longitude, hours)
    }

    fn get(
        &self,
        endpoint: &str,
        latitude: &str,
        longitude: &str,
        hours: Option<&str>,
    ) -> Result<Value> {
        let mut query = Params::new();
        query.insert("latitude".to_string(), latitude.to_string());
        query.insert("longitude".to_string(), longitude.to_string());
        if let Some(hours) = hours {
            query.insert("hours".to_string(), hours.to_string());
        }
        let path = build_path(ResourceKind::WorldRadiation, "", endpoint);
        self.client.get(&path, Some(&query), None)
    }
}
