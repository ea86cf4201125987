use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vectorlite_api::{run_server, EngineConfig};

/// vectorlite HTTP service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a config file, equivalent to setting VECTORLITE_CONFIG.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Some(path) = cli.config {
        std::env::set_var("VECTORLITE_CONFIG", path);
    }

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_server(config).await {
        tracing::error!(error = %err, "server terminated with error");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_target(false).init();
}
