use std::{collections::HashMap, fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use commute_ors::client::{OrsClient, OrsClientParams};
use commute_sensor::{
    config::{SensorConfig, ValidatedConfig},
    entity::{EntityState, MemoryStateStore},
    sensor::{SensorAttributes, TravelTimeSensor},
    travel_time::TravelTimeData,
    units::UnitSystem,
};

const API_KEY_ENV_VAR: &str = "ORS_API_KEY";

#[derive(Args)]
pub struct CommonArgs {
    /// Sensor configuration file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Entity states file (JSON map of entity id to state), standing in
    /// for a live state machine
    #[arg(short, long)]
    states: Option<PathBuf>,
}

pub struct SensorContext {
    pub sensor: TravelTimeSensor<OrsClient>,
    pub store: MemoryStateStore,
}

impl SensorContext {
    pub fn build(args: &CommonArgs) -> Result<Self, anyhow::Error> {
        let file = File::open(&args.config)
            .with_context(|| format!("opening config file {}", args.config.display()))?;
        let mut config: SensorConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing config file {}", args.config.display()))?;

        if config.api_key.is_none() {
            config.api_key = std::env::var(API_KEY_ENV_VAR).ok();
        }

        let ValidatedConfig {
            api_key,
            name,
            origin,
            destination,
            query,
        } = config.validate(UnitSystem::Metric)?;

        let client = OrsClient::new(OrsClientParams::new(api_key));
        let data = TravelTimeData::new(query, client);
        let sensor = TravelTimeSensor::new(name, origin, destination, data);

        let store = match &args.states {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening states file {}", path.display()))?;
                let states: HashMap<String, EntityState> =
                    serde_json::from_reader(BufReader::new(file))
                        .with_context(|| format!("parsing states file {}", path.display()))?;
                MemoryStateStore::new(states)
            }
            None => MemoryStateStore::default(),
        };

        Ok(Self { sensor, store })
    }
}

/// What `once` prints and `watch` logs each cycle.
#[derive(Serialize)]
pub struct SensorReport {
    pub name: String,
    pub state: Option<String>,
    pub unit_of_measurement: &'static str,
    pub icon: &'static str,
    pub attributes: Option<SensorAttributes>,
}

impl SensorReport {
    pub fn from_sensor(sensor: &TravelTimeSensor<OrsClient>) -> Self {
        Self {
            name: sensor.name().to_string(),
            state: sensor.state(),
            unit_of_measurement: sensor.unit_of_measurement(),
            icon: sensor.icon(),
            attributes: sensor.attributes(),
        }
    }
}
