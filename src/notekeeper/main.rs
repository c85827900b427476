use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::setup::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::commands::run(cli) {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
