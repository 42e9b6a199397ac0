use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = loggrep::Cli::parse();

    // -v raises our own default level; RUST_LOG still wins when set.
    let default_filter = if cli.verbose {
        "loggrep=info"
    } else {
        "loggrep=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(err) = loggrep::run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
