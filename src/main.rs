use clap::Parser;
use tracing::{Level, warn};

use detectai::cli::{Cli, Commands};
use detectai::commands::{self, Context};
use detectai::global::{self, Config};
use detectai::panel::{Analyzer, Explainer, Optimizer, Scanner};

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    global::ensure_global_config()?;

    // a broken config file must not lock the user out of `config reset`
    let config = match global::read_config() {
        Ok(config) => config,
        Err(error) if matches!(cli.command, Commands::Config(_)) => {
            warn!(%error, "ignoring unreadable config file");
            Config::default()
        }
        Err(error) => return Err(error),
    };

    let ctx = Context::new(&cli, config);

    match cli.command {
        Commands::Analyze(args) => commands::tool::run::<Analyzer>(args, &ctx).await,
        Commands::Summarize(args) => commands::tool::run::<Explainer>(args, &ctx).await,
        Commands::Optimize(args) => commands::tool::run::<Optimizer>(args, &ctx).await,
        Commands::Scan(args) => commands::tool::run::<Scanner>(args, &ctx).await,
        Commands::Shell(args) => commands::shell::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx),
    }
}
