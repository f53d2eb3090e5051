//! Main application entry point.

use clap::Parser;
use logicboard_app::{AppError, Script, board_config, run, write_png, write_report};
use logicboard_client::{ClientConfig, HttpRecognizer};
use logicboard_core::{BoardConfig, SnapshotLayers, Whiteboard};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "logicboard", about = "Replay a LogicBoard session against the recognition service")]
struct Cli {
    /// Session script (JSON).
    script: PathBuf,

    /// Recognition service root. Overrides LOGICBOARD_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds. Overrides LOGICBOARD_TIMEOUT_SECS.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Where to write the composite image.
    #[arg(long, default_value = "board.png")]
    out: PathBuf,

    /// Where to write placed annotations and variable bindings.
    #[arg(long)]
    annotations: Option<PathBuf>,

    /// Send background and ink merged instead of ink only.
    #[arg(long)]
    composite_snapshot: bool,
}

async fn run_cli(cli: Cli) -> Result<(), AppError> {
    let script = Script::load(&cli.script)?;

    let mut client_config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        client_config = client_config.with_base_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        client_config = client_config.with_request_timeout(Duration::from_secs(secs));
    }
    log::info!("Recognition service: {}", client_config.base_url);
    let recognizer = HttpRecognizer::new(&client_config)?;

    let mut base = BoardConfig::default();
    if cli.composite_snapshot {
        base = base.with_snapshot_layers(SnapshotLayers::Composite);
    }
    let mut board = Whiteboard::new(board_config(&script, base));

    let report = run(&script, &mut board, &recognizer).await?;
    write_png(&board, &cli.out)?;
    if let Some(path) = &cli.annotations {
        write_report(&report, path)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting LogicBoard");

    match run_cli(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
