//! A small blocking Rust client for the Solcast solar forecast API.
//!
//! Each API surface has its own wrapper: [`RooftopSite`], [`UtilitySite`],
//! [`WeatherSite`] and [`WorldRadiation`]. They share one [`Client`], which
//! builds URLs, authenticates with the API key and maps HTTP status codes to
//! [`Error`] variants.
//!
//! ## Quick start
//! - Pass the API key directly, or set `SOLCAST_API_KEY` and use
//!   [`Client::from_env`]. Base URL and default timeout live in
//!   [`ClientConfig`].
//! - Call an operation on the wrapper for your resource.
//!
//! ```no_run
//! use solcast::{Error, RooftopSite, params};
//!
//! fn main() -> Result<(), Error> {
//!     let site = RooftopSite::new("my-api-key", "abcd-1234-abcd-1234")?;
//!     let forecasts = site.get_forecasts_parsed(Some(&params([("hours", "24")])))?;
//!     for entry in &forecasts {
//!         println!("{:?} {:?}", entry.period_end, entry.get("pv_estimate"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Failures the service reports ([`Error::Validation`], [`Error::Site`],
//! [`Error::RateLimitExceeded`]) are distinct from transport failures
//! ([`Error::Transport`]). Nothing is retried; on a rate limit the reset time
//! is available through [`Error::rate_limit_reset_at`].

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod measurement;
mod resource;
mod rooftop;
mod timestamps;
mod util;
mod utility;
mod weather;
mod world;

pub use client::Client;
pub use config::{API_KEY_ENV, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use measurement::{Measurement, Measurements};
pub use resource::{ResourceKind, build_path};
pub use rooftop::RooftopSite;
pub use timestamps::{ParsedPayload, PeriodEntry, parse_datetime, parse_duration, parse_periods};
pub use util::{Params, params};
pub use utility::UtilitySite;
pub use weather::WeatherSite;
pub use world::WorldRadiation;
