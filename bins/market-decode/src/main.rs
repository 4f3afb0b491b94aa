mod cmd;

use clap::{Parser, Subcommand};
use cmd::config::{CommonArgs, DecodeArgs, Effective};
use cmd::endpoints::EndpointsArgs;
use cmd::error::MarketDecodeError;

#[derive(Parser)]
#[command(name = "market-decode", about = "Decode market-data page payloads (__data.json) into typed records")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode documents of one endpoint and print the records as JSON
    Decode(DecodeArgs),
    /// List known endpoints with their effective layout
    Endpoints(EndpointsArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MarketDecodeError> {
    match cli.command {
        Command::Decode(args) => {
            let eff = Effective::new(&cli.common, &args)?;
            cmd::decode::run(&eff).await
        }
        Command::Endpoints(args) => {
            let catalog = cmd::config::catalog(&cli.common)?;
            cmd::endpoints::run(&catalog, &args)
        }
    }
}
