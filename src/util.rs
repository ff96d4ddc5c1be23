use std::collections::BTreeMap;

/// Query parameters for a GET call, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

pub(crate) const FORMAT_PARAM: (&str, &str) = ("format", "json");

pub(crate) fn urljoin(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// `format=json` overlaid with the caller's parameters.
pub(crate) fn merge_query(params: Option<&Params>) -> Params {
    let mut query = Params::new();
    query.insert(FORMAT_PARAM.0.to_string(), FORMAT_PARAM.1.to_string());
    if let Some(params) = params {
        for (k, v) in params {
            query.insert(k.clone(), v.clone());
        }
    }
    query
}

/// Builds a [`Params`] map from string pairs.
pub fn params<K, V, I>(pairs: I) -> Params
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
