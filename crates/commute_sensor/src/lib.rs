//! Travel-time sensing over OpenRouteService: resolve two location
//! endpoints, fetch directions between them, and expose the result the
//! way a home automation sensor entity would.

pub mod config;
pub mod entity;
pub mod location;
pub mod sensor;
pub mod travel_time;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;
