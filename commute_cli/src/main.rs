use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{once::OnceArgs, watch::WatchArgs};

mod context;
mod once;
mod parsers;
mod watch;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the sensor once and print it as JSON
    Once {
        #[command(flatten)]
        args: OnceArgs,
    },
    /// Poll the sensor on a fixed interval
    #[command(visible_alias = "w")]
    Watch {
        #[command(flatten)]
        args: WatchArgs,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Once { args } => once::run(args).await?,
        Commands::Watch { args } => watch::run(args).await?,
        Commands::Schema => {
            let schema = schemars::schema_for!(commute_sensor::config::SensorConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
