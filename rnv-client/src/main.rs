use std::process::ExitCode;

use rnv_client::api::{DEFAULT_REGION_ID, StationMonitorRequest};
use rnv_client::domain::{MapFormat, MonitorMode, ThumbnailSize};
use rnv_client::{RnvClient, RnvConfig, RnvError};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: rnv <command> [args]

Commands:
  news                       Current news entries
  lines                      Type, colour and icon of every line
  line-package               Stop sequence of every line
  stations [region]          All stations of a region (default 1)
  monitor <hafas> [DEP|ARR]  Departures or arrivals at a station, now
  ticker <line>...           Ticker messages for lines
  detail <station>           Details of one station
  map [size] [png|pdf]       Available maps

Environment:
  RNV_API_TOKEN  API token (required)
  RNV_BASE_URL   Override the API base URL
  RUST_LOG       Log filter, e.g. rnv_client=debug";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(command, &args[1..]).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => {
                println!("{pretty}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render response: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: &str, rest: &[String]) -> Result<Value, RnvError> {
    let client = RnvClient::new(RnvConfig::from_env()?)?;

    match command {
        "news" => client.news().await,
        "lines" => client.all_lines().await,
        "line-package" => client.line_package().await,
        "stations" => {
            let region = rest.first().map_or(DEFAULT_REGION_ID, String::as_str);
            client.station_package(region).await
        }
        "monitor" => {
            let hafas = rest.first().map_or("", String::as_str);
            let mode = match rest.get(1) {
                Some(mode) => mode.parse::<MonitorMode>()?,
                None => MonitorMode::default(),
            };
            let now = chrono::Local::now().naive_local();
            let request = StationMonitorRequest::new(hafas, now).with_mode(mode);
            client.station_monitor(&request).await
        }
        "ticker" => client.ticker(rest).await,
        "detail" => {
            let station = rest.first().map_or("", String::as_str);
            client.station_detail(station).await
        }
        "map" => {
            let size = match rest.first() {
                Some(size) => size.parse::<ThumbnailSize>()?,
                None => ThumbnailSize::default(),
            };
            let format = match rest.get(1) {
                Some(format) => format.parse::<MapFormat>()?,
                None => MapFormat::default(),
            };
            client.map(size, format).await
        }
        other => Err(RnvError::InvalidArgument {
            name: "command",
            reason: format!("unknown command {other:?}\n\n{USAGE}"),
        }),
    }
}
