use clap::{Args as ClapArgs, Subcommand};

use crate::api::ApiClient;
use crate::global::{self, Config};
use crate::render::OutputFormat;

use super::{Context, UrlSource};

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current configuration
    Show,
    /// Set the base url of the analysis backend
    SetBackend {
        /// Absolute http(s) url, e.g. http://127.0.0.1:8000
        url: String,
    },
    /// Set the default output format
    SetOutput {
        #[arg(value_enum)]
        format: OutputFormat,
    },
    /// Restore the default configuration
    Reset,
}

pub fn run(args: Args, ctx: &Context) -> miette::Result<()> {
    let mut config = ctx.config.clone();

    match args.command {
        Command::Show => {}
        Command::SetBackend { url } => {
            let client = ApiClient::new(&url)?;
            config.backend.url = client.base_url().to_string();
            global::save_config(&config)?;
        }
        Command::SetOutput { format } => {
            config.output.format = format;
            global::save_config(&config)?;
        }
        Command::Reset => {
            config = Config::default();
            global::save_config(&config)?;
        }
    }

    print_status(&config, ctx)
}

fn print_status(config: &Config, ctx: &Context) -> miette::Result<()> {
    println!("Config file: {}", crate::home::config_path()?.display());
    println!("Backend: {}", config.backend.url);

    let format = match config.output.format {
        OutputFormat::Markdown => "markdown",
        OutputFormat::Json => "json",
    };
    println!("Output: {format}");

    if let (url, UrlSource::Override) = ctx.backend_url() {
        println!("Backend override in effect: {url}");
    }

    Ok(())
}
