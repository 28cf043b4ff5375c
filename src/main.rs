//! trendbot CLI entry point.

use clap::Parser;

use trendbot::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve(args) => trendbot::cli::commands::serve::execute(args, config_path).await,
        Commands::Config(args) => {
            trendbot::cli::commands::config::execute(args, config_path, cli.json)
        }
    };

    if let Err(err) = result {
        trendbot::cli::handle_error(err, cli.json);
    }
}
