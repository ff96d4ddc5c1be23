use anyhow::Result;
use solcast::{Client, RooftopSite, params};

fn main() -> Result<()> {
    // Configure the key via SOLCAST_API_KEY.
    // The site id is the first command-line argument.
    let resource_id = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: rooftop_forecasts <resource-id>"))?;

    let site = RooftopSite::with_client(Client::from_env()?, resource_id);
    let forecasts = site.get_forecasts_parsed(Some(&params([("hours", "24")])))?;

    for entry in &forecasts {
        let estimate = entry
            .get("pv_estimate")
            .map(|v| v.to_string())
            .unwrap_or_default();
        match (entry.period_start(), entry.period_end) {
            (Some(start), Some(end)) => println!("{} - {}  {} kW", start, end, estimate),
            _ => println!("(no period)  {} kW", estimate),
        }
    }
    Ok(())
}
