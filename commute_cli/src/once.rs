use clap::Args;

use crate::context::{CommonArgs, SensorContext, SensorReport};

#[derive(Args)]
pub struct OnceArgs {
    #[command(flatten)]
    common: CommonArgs,
}

pub async fn run(args: OnceArgs) -> Result<(), anyhow::Error> {
    let SensorContext { mut sensor, store } = SensorContext::build(&args.common)?;

    sensor.refresh(&store).await?;

    let report = SensorReport::from_sensor(&sensor);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
