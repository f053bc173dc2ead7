use clap::Parser;
use cli::Args;
use config::{Config, Settings};
use deployment::DeploymentContext;
use network::RpcNetwork;
use tracing_error::ErrorLayer;
use tracing_indicatif::style::ProgressStyle;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod contract_artifacts;
pub mod deployment_info;
pub mod forge_utils;
pub mod serde_utils;

mod cli;
mod config;
mod network;
mod report;
mod types;

mod deployment;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

async fn start() -> eyre::Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).await?;
    let settings = Settings::resolve(args, config)?;

    tracing::debug!(?settings, "Resolved settings");

    let network = RpcNetwork::connect(&settings).await?;
    let context = DeploymentContext::new(settings, network);

    deployment::run_deployment(&context).await
}

/// Prints the error, if any, and picks the matching process exit code
fn exit_code<T>(result: &eyre::Result<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            EXIT_FAILURE
        }
    }
}

const PROGRESS_TEMPLATE: &str =
    "{span_child_prefix}{spinner:.green} {span_name}{{{span_fields}}} {elapsed}";

fn init_tracing() -> eyre::Result<()> {
    let indicatif_layer = IndicatifLayer::new()
        .with_progress_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?);

    let filter = EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    dotenv::dotenv().ok();

    init_tracing()?;

    let result = start().await;

    std::process::exit(exit_code(&result))
}
