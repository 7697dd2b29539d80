//! Result records returned by the analysis backend.
//!
//! Field names follow the backend's JSON (snake_case). Every record is
//! immutable once decoded; the panels only ever replace them wholesale.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unknown labels are kept verbatim in `Other` rather than failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BugSeverity {
    Critical,
    Major,
    Minor,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for BugSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BugSeverity::Critical => write!(f, "Critical"),
            BugSeverity::Major => write!(f, "Major"),
            BugSeverity::Minor => write!(f, "Minor"),
            BugSeverity::Other(label) => write!(f, "{label}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskSeverity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskSeverity::Critical => write!(f, "Critical"),
            RiskSeverity::High => write!(f, "High"),
            RiskSeverity::Medium => write!(f, "Medium"),
            RiskSeverity::Low => write!(f, "Low"),
            RiskSeverity::Other(label) => write!(f, "{label}"),
        }
    }
}

/// A single bug reported by `/analyze`. Missing text fields decode as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub line: u32,
    #[serde(default)]
    pub description: String,
    /// The offending code as quoted by the backend.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub fix_suggestion: String,
    #[serde(default)]
    pub corrected_code: String,
    pub severity: BugSeverity,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub detailed_explanation: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimized_code: String,
    #[serde(default)]
    pub explanation: Vec<String>,
    pub complexity_analysis: ComplexityAnalysis,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub line: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vulnerability_type: String,
    pub severity: RiskSeverity,
    #[serde(default)]
    pub fix_suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
