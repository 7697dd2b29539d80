use std::io::IsTerminal as _;

use askama::Template;
use clap::ValueEnum;
use miette::IntoDiagnostic as _;
use serde::{Deserialize, Serialize};
use termimad::MadSkin;

use crate::model::{AnalysisResult, OptimizationResult, ScanResult, SummaryResult};
use crate::panel::kinds::{
    COMPLEXITY, DETAILED_EXPLANATION, EXPLANATION, KEY_POINTS, OPTIMIZED_CODE, RECOMMENDATIONS,
    error_section, vulnerability_section,
};
use crate::panel::{Panel, ToolKind, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Tells the renderer whether a collapsible section is open.
pub type SectionFilter<'a> = &'a dyn Fn(&str) -> bool;

pub fn all_expanded(_key: &str) -> bool {
    true
}

pub trait Report {
    fn to_markdown(&self, expanded: SectionFilter<'_>) -> Result<String, askama::Error>;
}

// ============================================================================
// Views
// ============================================================================

struct ErrorRow {
    key: String,
    number: usize,
    line: u32,
    severity: String,
    category: String,
    description: String,
    code: String,
    fix_suggestion: String,
    corrected_code: String,
    open: bool,
}

struct VulnerabilityRow {
    key: String,
    number: usize,
    line: u32,
    severity: String,
    vulnerability_type: String,
    description: String,
    fix_suggestion: String,
    open: bool,
}

// ============================================================================
// Askama Templates
// ============================================================================

#[derive(Template)]
#[template(path = "analysis.md")]
struct AnalysisTemplate {
    rows: Vec<ErrorRow>,
}

#[derive(Template)]
#[template(path = "summary.md")]
struct SummaryTemplate<'a> {
    summary: &'a str,
    detailed_explanation: &'a str,
    key_points: &'a [String],
    explanation_open: bool,
    key_points_open: bool,
}

#[derive(Template)]
#[template(path = "optimization.md")]
struct OptimizationTemplate<'a> {
    optimized_code: &'a str,
    explanation: &'a [String],
    before: &'a str,
    after: &'a str,
    remarks: &'a str,
    code_open: bool,
    explanation_open: bool,
    complexity_open: bool,
}

#[derive(Template)]
#[template(path = "scan.md")]
struct ScanTemplate<'a> {
    summary: &'a str,
    rows: Vec<VulnerabilityRow>,
    recommendations: &'a [String],
    recommendations_open: bool,
}

#[derive(Template)]
#[template(path = "report.md")]
struct ReportTemplate<'a> {
    title: &'a str,
    generated_at: String,
    endpoint: &'a str,
    body: &'a str,
}

impl Report for AnalysisResult {
    fn to_markdown(&self, expanded: SectionFilter<'_>) -> Result<String, askama::Error> {
        let rows = self
            .errors
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let key = error_section(idx);
                ErrorRow {
                    open: expanded(&key),
                    key,
                    number: idx + 1,
                    line: item.line,
                    severity: item.severity.to_string(),
                    category: item.category.clone(),
                    description: item.description.clone(),
                    code: item.code.clone(),
                    fix_suggestion: item.fix_suggestion.clone(),
                    corrected_code: item.corrected_code.clone(),
                }
            })
            .collect();

        AnalysisTemplate { rows }.render()
    }
}

impl Report for SummaryResult {
    fn to_markdown(&self, expanded: SectionFilter<'_>) -> Result<String, askama::Error> {
        SummaryTemplate {
            summary: &self.summary,
            detailed_explanation: &self.detailed_explanation,
            key_points: &self.key_points,
            explanation_open: expanded(DETAILED_EXPLANATION),
            key_points_open: expanded(KEY_POINTS),
        }
        .render()
    }
}

impl Report for OptimizationResult {
    fn to_markdown(&self, expanded: SectionFilter<'_>) -> Result<String, askama::Error> {
        OptimizationTemplate {
            optimized_code: &self.optimized_code,
            explanation: &self.explanation,
            before: &self.complexity_analysis.before,
            after: &self.complexity_analysis.after,
            remarks: &self.remarks,
            code_open: expanded(OPTIMIZED_CODE),
            explanation_open: expanded(EXPLANATION),
            complexity_open: expanded(COMPLEXITY),
        }
        .render()
    }
}

impl Report for ScanResult {
    fn to_markdown(&self, expanded: SectionFilter<'_>) -> Result<String, askama::Error> {
        let rows = self
            .vulnerabilities
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let key = vulnerability_section(idx);
                VulnerabilityRow {
                    open: expanded(&key),
                    key,
                    number: idx + 1,
                    line: item.line,
                    severity: item.severity.to_string(),
                    vulnerability_type: item.vulnerability_type.clone(),
                    description: item.description.clone(),
                    fix_suggestion: item.fix_suggestion.clone(),
                }
            })
            .collect();

        ScanTemplate {
            summary: &self.summary,
            rows,
            recommendations: &self.recommendations,
            recommendations_open: expanded(RECOMMENDATIONS),
        }
        .render()
    }
}

// ============================================================================
// Panel Rendering
// ============================================================================

/// Markdown for the whole panel body, whatever state it is in.
pub fn panel_markdown<K: ToolKind>(
    panel: &Panel<K>,
    expanded: SectionFilter<'_>,
) -> miette::Result<String> {
    let body = match panel.state() {
        ViewState::Idle => "*Nothing submitted yet.*".to_string(),
        ViewState::Submitting => "*Waiting for the backend...*".to_string(),
        ViewState::RejectedInput { message } => {
            format!("**Invalid input:** {message}")
        }
        ViewState::Failed { message } => {
            format!("**Request failed:** {message}")
        }
        ViewState::Succeeded(result) => result.to_markdown(expanded).into_diagnostic()?,
    };

    Ok(format!("# {}\n\n{}\n", panel.title(), body))
}

pub fn report_markdown<K: ToolKind>(
    panel: &Panel<K>,
    endpoint: &str,
    body: &str,
) -> miette::Result<String> {
    ReportTemplate {
        title: panel.title(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        endpoint,
        body,
    }
    .render()
    .into_diagnostic()
}

pub fn result_json<K: ToolKind>(result: &K::Output) -> miette::Result<String> {
    serde_json::to_string_pretty(result).into_diagnostic()
}

pub fn print_markdown(markdown: &str) {
    if std::io::stdout().is_terminal() {
        let skin = MadSkin::default();
        skin.print_text(markdown);
    } else {
        println!("{markdown}");
    }
}
