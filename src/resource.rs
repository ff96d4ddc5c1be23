use std::fmt;

/// The four API surfaces exposed by Solcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    RooftopSite,
    UtilityScaleSite,
    WeatherSite,
    WorldRadiation,
}

impl ResourceKind {
    /// First path segment of every endpoint of this kind.
    pub fn uri(self) -> &'static str {
        match self {
            ResourceKind::RooftopSite => "rooftop_sites",
            ResourceKind::UtilityScaleSite => "utility_scale_sites",
            ResourceKind::WeatherSite => "weather_sites",
            ResourceKind::WorldRadiation => "world_radiation",
        }
    }

    /// Whether endpoint paths carry a resource id segment.
    pub fn has_resource_id(self) -> bool {
        !matches!(self, ResourceKind::WorldRadiation)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

// Endpoint names, relative to `/<kind>/<resource_id>/`.
pub(crate) const FORECASTS: &str = "forecasts";
pub(crate) const ESTIMATED_ACTUALS: &str = "estimated_actuals";
pub(crate) const MEASUREMENTS: &str = "measurements";
pub(crate) const RADIATION_FORECASTS: &str = "weather/forecasts";
pub(crate) const RADIATION_ESTIMATED_ACTUALS: &str = "weather/estimated_actuals";

/// Composes `/<kind>/<resource_id>/<endpoint>`.
///
/// World radiation has no resource id, so its paths are `/<kind>/<endpoint>`
/// and `resource_id` is ignored.
pub fn build_path(kind: ResourceKind, resource_id: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    if kind.has_resource_id() {
        format!("/{}/{}/{}", kind.uri(), resource_id, endpoint)
    } else {
        format!("/{}/{}", kind.uri(), endpoint)
    }
}
