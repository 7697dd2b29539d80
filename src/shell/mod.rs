//! Interactive navigation between the four tool panels.
//!
//! Each panel keeps its own state for the lifetime of the shell, so going
//! home and back shows the last result again.

use std::fmt;
use std::path::PathBuf;

use inquire::{Editor, InquireError, Select, Text};
use miette::IntoDiagnostic as _;
use tracing::debug;

use crate::api::{ApiClient, UploadFile};
use crate::panel::{self, Analyzer, Completion, Explainer, Optimizer, Panel, Scanner, ToolKind};
use crate::render;

mod route;

pub use route::Route;

enum HomeChoice {
    Open(Route),
    Quit,
}

impl fmt::Display for HomeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeChoice::Open(route) => write!(f, "{route}"),
            HomeChoice::Quit => write!(f, "Quit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelAction {
    EditSource,
    ChooseFile,
    SubmitText,
    UploadFile,
    ToggleSection,
    Reset,
    Home,
}

impl PanelAction {
    fn available<K: ToolKind>(panel: &Panel<K>) -> Vec<PanelAction> {
        let mut actions = vec![PanelAction::EditSource, PanelAction::ChooseFile];

        if !panel.input().trim().is_empty() {
            actions.push(PanelAction::SubmitText);
        }

        if panel.selected_file().is_some() {
            actions.push(PanelAction::UploadFile);
        }

        if !panel.section_keys().is_empty() {
            actions.push(PanelAction::ToggleSection);
        }

        actions.push(PanelAction::Reset);
        actions.push(PanelAction::Home);
        actions
    }
}

impl fmt::Display for PanelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelAction::EditSource => write!(f, "Edit source code"),
            PanelAction::ChooseFile => write!(f, "Choose a file"),
            PanelAction::SubmitText => write!(f, "Submit source code"),
            PanelAction::UploadFile => write!(f, "Upload selected file"),
            PanelAction::ToggleSection => write!(f, "Expand / collapse a section"),
            PanelAction::Reset => write!(f, "Reset"),
            PanelAction::Home => write!(f, "Back home"),
        }
    }
}

/// Esc and Ctrl-C come back as `None`; everything else is an error.
fn cancellable<T>(result: Result<T, InquireError>) -> miette::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(error) => Err(error).into_diagnostic(),
    }
}

pub struct Shell {
    client: ApiClient,
    analyzer: Panel<Analyzer>,
    explainer: Panel<Explainer>,
    optimizer: Panel<Optimizer>,
    scanner: Panel<Scanner>,
}

impl Shell {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            analyzer: Panel::new(),
            explainer: Panel::new(),
            optimizer: Panel::new(),
            scanner: Panel::new(),
        }
    }

    pub async fn run(&mut self, start: Route) -> miette::Result<()> {
        let mut route = start;

        loop {
            debug!(route = route.path(), "navigating");

            route = match route {
                Route::Home => match home_menu()? {
                    Some(next) => next,
                    None => return Ok(()),
                },
                Route::Analyzer => run_panel(&self.client, &mut self.analyzer).await?,
                Route::Explainer => run_panel(&self.client, &mut self.explainer).await?,
                Route::Optimizer => run_panel(&self.client, &mut self.optimizer).await?,
                Route::Scanner => run_panel(&self.client, &mut self.scanner).await?,
            };
        }
    }
}

fn home_choices() -> Vec<HomeChoice> {
    let mut choices = Route::DESTINATIONS
        .into_iter()
        .map(HomeChoice::Open)
        .collect::<Vec<_>>();
    choices.push(HomeChoice::Quit);
    choices
}

fn home_menu() -> miette::Result<Option<Route>> {
    let choices = home_choices();

    let choice = cancellable(Select::new("DetectAI - choose a tool", choices).raw_prompt())?;

    // Quit sits past the last destination, so its index maps to no route
    Ok(choice.and_then(|option| Route::from_menu_index(option.index + 1)))
}

fn print_panel<K: ToolKind>(panel: &Panel<K>) -> miette::Result<()> {
    let is_open = |key: &str| panel.is_expanded(key);
    let mut markdown = render::panel_markdown(panel, &is_open)?;

    let source_lines = panel.input().lines().count();
    if source_lines > 0 {
        markdown.push_str(&format!("\n*source: {source_lines} line(s)*\n"));
    }

    if let Some(file) = panel.selected_file() {
        markdown.push_str(&format!(
            "\n*file: {} ({} bytes)*\n",
            file.name(),
            file.len()
        ));
    }

    render::print_markdown(&markdown);
    Ok(())
}

async fn run_panel<K: ToolKind>(client: &ApiClient, panel: &mut Panel<K>) -> miette::Result<Route> {
    loop {
        print_panel(panel)?;

        let actions = PanelAction::available(panel);
        let Some(action) = cancellable(Select::new(panel.title(), actions).prompt())? else {
            return Ok(Route::Home);
        };

        match action {
            PanelAction::EditSource => {
                let edited = Editor::new("Source code")
                    .with_predefined_text(panel.input())
                    .prompt();

                if let Some(text) = cancellable(edited)? {
                    panel.set_input(text);
                }
            }
            PanelAction::ChooseFile => {
                let Some(path) = cancellable(Text::new("Path to the file").prompt())? else {
                    continue;
                };

                match UploadFile::from_path(&PathBuf::from(path.trim())) {
                    Ok(file) => panel.select_file(file),
                    Err(error) => eprintln!("{:?}", miette::Report::new(error)),
                }
            }
            PanelAction::SubmitText => {
                if let Some(ticket) = panel.submit_text() {
                    submit(client, panel, ticket).await?;
                }
            }
            PanelAction::UploadFile => {
                if let Some(ticket) = panel.submit_file() {
                    submit(client, panel, ticket).await?;
                }
            }
            PanelAction::ToggleSection => {
                let keys = panel.section_keys();
                if let Some(key) = cancellable(Select::new("Section", keys).prompt())? {
                    panel.toggle_section(&key);
                }
            }
            PanelAction::Reset => panel.reset(),
            PanelAction::Home => return Ok(Route::Home),
        }
    }
}

async fn submit<K: ToolKind>(
    client: &ApiClient,
    panel: &mut Panel<K>,
    ticket: panel::Ticket,
) -> miette::Result<()> {
    print_panel(panel)?;

    if panel::drive(client, panel, ticket).await == Completion::Stale {
        debug!(tool = %panel.tool(), "response arrived after a newer action");
    }

    Ok(())
}
