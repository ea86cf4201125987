mod client;
mod csv_import;
mod literal;
mod repl;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Interactive client for the vectorlite HTTP service.
#[derive(Parser, Debug)]
#[command(name = "vectorlite-cli")]
#[command(about = "Interactive client for a vectorlite server", long_about = None)]
#[command(version)]
struct Cli {
    /// vectorlite server URL.
    #[arg(long, default_value = "http://localhost:9123")]
    server: String,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let mut repl = repl::Repl::new(cli.server);
    repl.run().await;
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(env_filter).with_target(false).init();
}
