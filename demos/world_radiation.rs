use anyhow::Result;
use solcast::{Client, Error, WorldRadiation};

fn main() -> Result<()> {
    let world = WorldRadiation::with_client(Client::from_env()?);

    match world.get_forecasts("-35.28", "149.13", Some("12")) {
        Ok(forecasts) => println!("{}", serde_json::to_string_pretty(&forecasts)?),
        Err(e @ Error::RateLimitExceeded { .. }) => {
            // Retry scheduling is left to the caller.
            eprintln!("{}; retry after {:?}", e, e.rate_limit_reset_at());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
