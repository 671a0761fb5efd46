use clap::Args;
use tracing::{debug, info, warn};

use crate::{
    context::{CommonArgs, SensorContext, SensorReport},
    parsers,
};

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Time between refreshes (e.g., "30s", "5m", "PT1H")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "5m")]
    interval: jiff::SignedDuration,
}

pub async fn run(args: WatchArgs) -> Result<(), anyhow::Error> {
    let SensorContext { mut sensor, store } = SensorContext::build(&args.common)?;

    let period: std::time::Duration = args.interval.try_into()?;
    if period.is_zero() {
        anyhow::bail!("interval must be positive");
    }
    let mut ticker = tokio::time::interval(period);

    info!("Polling {} every {}", sensor.name(), args.interval);

    loop {
        ticker.tick().await;

        // A failed cycle is logged and skipped, the stale state stays
        // visible until the next success.
        if let Err(error) = sensor.refresh(&store).await {
            warn!("Refresh failed: {error}");
            continue;
        }

        let report = SensorReport::from_sensor(&sensor);
        match &report.state {
            Some(state) => info!(
                "{}: {} {}",
                report.name, state, report.unit_of_measurement
            ),
            None => info!("{}: state unknown", report.name),
        }
        debug!("{}", serde_json::to_string(&report)?);
    }
}
