use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::Args as ClapArgs;
use miette::{Context as _, Diagnostic, IntoDiagnostic as _};
use thiserror::Error;
use tracing::info;

use crate::api::{ToolRequest, UploadFile};
use crate::panel::{self, Panel, ToolKind, ViewState};
use crate::render::{self, OutputFormat};

use super::Context;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("nothing to submit")]
    #[diagnostic(
        code(detectai::tool::empty),
        help("Pass --code, --file, or pipe source code on stdin")
    )]
    NothingToSubmit,

    #[error("the backend rejected the input: {message}")]
    #[diagnostic(
        code(detectai::tool::rejected),
        help("Make sure the submission is valid source code")
    )]
    Rejected { message: String },

    #[error("{tool} request failed: {message}")]
    #[diagnostic(code(detectai::tool::failed))]
    Failed { tool: String, message: String },
}

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Source code to submit. Read from stdin when neither --code nor --file is given.
    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// File to upload as-is instead of submitting text.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Output format. Defaults to the one in the config file.
    #[arg(long, short, value_enum)]
    pub output: Option<OutputFormat>,

    /// Also write a markdown report to this path.
    #[arg(long)]
    pub report_out: Option<PathBuf>,
}

fn read_stdin() -> miette::Result<String> {
    let mut buffer = String::new();

    std::io::stdin()
        .read_to_string(&mut buffer)
        .into_diagnostic()
        .context("reading source code from stdin")?;

    Ok(buffer)
}

fn write_text_file(path: &Path, content: &str) -> miette::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .into_diagnostic()
        .with_context(|| format!("Failed to write file {}", path.display()))
}

pub async fn run<K: ToolKind>(args: Args, ctx: &Context) -> miette::Result<()> {
    let client = ctx.client()?;
    let mut panel = Panel::<K>::new();

    let ticket = match (args.code, &args.file) {
        (_, Some(path)) => {
            panel.select_file(UploadFile::from_path(path)?);
            panel.submit_file()
        }
        (Some(code), None) => {
            panel.set_input(code);
            panel.submit_text()
        }
        (None, None) => {
            panel.set_input(read_stdin()?);
            panel.submit_text()
        }
    };

    let Some(ticket) = ticket else {
        return Err(Error::NothingToSubmit.into());
    };

    let endpoint = match ticket.request() {
        ToolRequest::Text(_) => client.endpoint(K::TOOL.text_path()),
        ToolRequest::File(_) => client.endpoint(K::TOOL.file_path()),
    };

    info!(tool = %K::TOOL, %endpoint, "submitting");
    panel::drive(&client, &mut panel, ticket).await;

    let result = match panel.state() {
        ViewState::Succeeded(result) => result,
        ViewState::RejectedInput { message } => {
            return Err(Error::Rejected {
                message: message.clone(),
            }
            .into());
        }
        ViewState::Failed { message } => {
            return Err(Error::Failed {
                tool: K::TOOL.to_string(),
                message: message.clone(),
            }
            .into());
        }
        ViewState::Idle | ViewState::Submitting => {
            return Err(miette::miette!("no response was applied to the {} panel", K::TOOL));
        }
    };

    match args.output.unwrap_or(ctx.config.output.format) {
        OutputFormat::Json => println!("{}", render::result_json::<K>(result)?),
        OutputFormat::Markdown => {
            let markdown = render::panel_markdown(&panel, &render::all_expanded)?;
            render::print_markdown(&markdown);
        }
    }

    if let Some(path) = &args.report_out {
        let body = render::Report::to_markdown(result, &render::all_expanded).into_diagnostic()?;
        let report = render::report_markdown(&panel, &endpoint, &body)?;

        write_text_file(path, &report)?;
        eprintln!("Report written to: {}", path.display());
    }

    Ok(())
}
