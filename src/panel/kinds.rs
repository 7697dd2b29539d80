use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

use crate::api::Tool;
use crate::model::{AnalysisResult, OptimizationResult, ScanResult, SummaryResult};
use crate::render::Report;

pub const DETAILED_EXPLANATION: &str = "detailed-explanation";
pub const KEY_POINTS: &str = "key-points";
pub const OPTIMIZED_CODE: &str = "optimized-code";
pub const EXPLANATION: &str = "explanation";
pub const COMPLEXITY: &str = "complexity";
pub const RECOMMENDATIONS: &str = "recommendations";

pub fn error_section(index: usize) -> String {
    format!("error-{}", index + 1)
}

pub fn vulnerability_section(index: usize) -> String {
    format!("vulnerability-{}", index + 1)
}

/// What varies between the four panels: endpoints, envelope and result shape.
pub trait ToolKind {
    const TOOL: Tool;
    const TITLE: &'static str;

    type Output: DeserializeOwned + Serialize + Clone + Debug + PartialEq + Report;

    /// Collapsible sections of a result, in display order.
    fn section_keys(output: &Self::Output) -> Vec<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct Analyzer;

impl ToolKind for Analyzer {
    const TOOL: Tool = Tool::Analyze;
    const TITLE: &'static str = "Code Analyzer";

    type Output = AnalysisResult;

    fn section_keys(output: &AnalysisResult) -> Vec<String> {
        (0..output.errors.len()).map(error_section).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Explainer;

impl ToolKind for Explainer {
    const TOOL: Tool = Tool::Summarize;
    const TITLE: &'static str = "Code Explainer";

    type Output = SummaryResult;

    fn section_keys(_output: &SummaryResult) -> Vec<String> {
        vec![DETAILED_EXPLANATION.to_string(), KEY_POINTS.to_string()]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Optimizer;

impl ToolKind for Optimizer {
    const TOOL: Tool = Tool::Optimize;
    const TITLE: &'static str = "Code Optimizer";

    type Output = OptimizationResult;

    fn section_keys(_output: &OptimizationResult) -> Vec<String> {
        vec![
            OPTIMIZED_CODE.to_string(),
            EXPLANATION.to_string(),
            COMPLEXITY.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scanner;

impl ToolKind for Scanner {
    const TOOL: Tool = Tool::SecurityScan;
    const TITLE: &'static str = "Security Scanner";

    type Output = ScanResult;

    fn section_keys(output: &ScanResult) -> Vec<String> {
        let mut keys = (0..output.vulnerabilities.len())
            .map(vulnerability_section)
            .collect::<Vec<String>>();

        keys.push(RECOMMENDATIONS.to_string());
        keys
    }
}
