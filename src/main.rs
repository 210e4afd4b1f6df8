use clap::Parser;
use dotenv::dotenv;
use refresh_probe::{Config, ProbeError, error_chain, logging::init_logging, run_probe};
use std::{env, io::stdout, path::PathBuf, process};

#[derive(Parser)]
#[command(name = "refresh-probe")]
#[command(about = "Replay a saved refresh token against the auth service refresh endpoint")]
struct Cli {
    /// Saved login response containing data.tokens.refreshToken
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Refresh endpoint to call
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = probe(cli).await {
        eprintln!("Refresh probe failed: {}", error_chain(&e));
        process::exit(1);
    }
}

async fn probe(cli: Cli) -> Result<(), ProbeError> {
    let config = Config::resolve(cli.input, cli.url, |key| env::var(key).ok())?;
    run_probe(&config, &mut stdout().lock()).await?;
    Ok(())
}
