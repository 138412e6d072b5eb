/*
 * RFC-001: CI/CD Integration for Differential Taint Analysis
 *
 * Turns a `DifferentialTaintResult` into the formats CI systems consume:
 * - SARIF (GitHub code scanning, most static analysis dashboards)
 * - GitHub Actions workflow commands (inline PR annotations)
 * - GitLab CI JSON (Code Quality report)
 * - Markdown PR comment summary
 *
 * Also decides the process exit code a CI job should use.
 */

use serde::{Deserialize, Serialize};

use super::result::{DifferentialTaintResult, Severity, Vulnerability};

/// Process exit code a CI job should return for a given result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CIExitCode {
    /// No new vulnerabilities.
    Pass,
    /// New vulnerabilities found, none high/critical.
    Warn,
    /// At least one new high or critical severity vulnerability.
    Fail,
}

impl CIExitCode {
    pub fn from_result(result: &DifferentialTaintResult) -> Self {
        if result.has_high_severity_regression() {
            CIExitCode::Fail
        } else if !result.new_vulnerabilities.is_empty() {
            CIExitCode::Warn
        } else {
            CIExitCode::Pass
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            CIExitCode::Pass => 0,
            CIExitCode::Warn => 0,
            CIExitCode::Fail => 1,
        }
    }
}

fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low | Severity::Info => "note",
    }
}

/// Minimal SARIF 2.1.0 report (rules + results), enough for GitHub code
/// scanning to render inline annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifText {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifText,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: u32,
}

impl SarifReport {
    pub fn from_result(result: &DifferentialTaintResult) -> Self {
        let results = result
            .new_vulnerabilities
            .iter()
            .map(vulnerability_to_sarif_result)
            .collect();

        SarifReport {
            version: "2.1.0".to_string(),
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json".to_string(),
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "codegraph-differential-taint".to_string(),
                        rules: rule_set(result),
                    },
                },
                results,
            }],
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn rule_set(result: &DifferentialTaintResult) -> Vec<SarifRule> {
    let mut seen = std::collections::HashSet::new();
    let mut rules = Vec::new();
    for vuln in &result.new_vulnerabilities {
        let id = vuln.category.as_str().to_string();
        if seen.insert(id.clone()) {
            rules.push(SarifRule {
                id: id.clone(),
                short_description: SarifText { text: id },
            });
        }
    }
    rules
}

fn vulnerability_to_sarif_result(vuln: &Vulnerability) -> SarifResult {
    SarifResult {
        rule_id: vuln.category.as_str().to_string(),
        level: severity_to_sarif_level(vuln.severity).to_string(),
        message: SarifText {
            text: vuln.description.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: vuln.file_path.clone(),
                },
                region: SarifRegion {
                    start_line: vuln.sink.line,
                },
            },
        }],
    }
}

/// Emits GitHub Actions workflow commands (`::error file=...::...`) for
/// inline PR annotations.
pub struct GitHubActionsReporter;

impl GitHubActionsReporter {
    pub fn report(result: &DifferentialTaintResult) -> String {
        let mut lines = Vec::new();
        for vuln in &result.new_vulnerabilities {
            let level = match vuln.severity {
                Severity::Critical | Severity::High => "error",
                Severity::Medium => "warning",
                Severity::Low | Severity::Info => "notice",
            };
            lines.push(format!(
                "::{level} file={file},line={line}::{desc} ({category})",
                level = level,
                file = vuln.file_path,
                line = vuln.sink.line,
                desc = vuln.description,
                category = vuln.category.as_str(),
            ));
        }
        lines.join("\n")
    }
}

/// Emits GitLab CI's Code Quality report format (array of issues).
pub struct GitLabCIReporter;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GitLabCodeQualityIssue {
    description: String,
    #[serde(rename = "check_name")]
    check_name: String,
    fingerprint: String,
    severity: String,
    location: GitLabLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GitLabLocation {
    path: String,
    lines: GitLabLines,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GitLabLines {
    begin: u32,
}

fn severity_to_gitlab(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "blocker",
        Severity::High => "critical",
        Severity::Medium => "major",
        Severity::Low => "minor",
        Severity::Info => "info",
    }
}

impl GitLabCIReporter {
    pub fn report(result: &DifferentialTaintResult) -> Result<String, serde_json::Error> {
        let issues: Vec<GitLabCodeQualityIssue> = result
            .new_vulnerabilities
            .iter()
            .map(|vuln| GitLabCodeQualityIssue {
                description: vuln.description.clone(),
                check_name: vuln.category.as_str().to_string(),
                fingerprint: vuln.id.clone(),
                severity: severity_to_gitlab(vuln.severity).to_string(),
                location: GitLabLocation {
                    path: vuln.file_path.clone(),
                    lines: GitLabLines {
                        begin: vuln.sink.line,
                    },
                },
            })
            .collect();

        serde_json::to_string_pretty(&issues)
    }
}

/// Formats a human-readable markdown summary for a pull request comment.
pub struct PRCommentFormatter;

impl PRCommentFormatter {
    pub fn format(result: &DifferentialTaintResult) -> String {
        let mut out = String::new();
        out.push_str("## Differential taint analysis\n\n");
        out.push_str(&format!("{}\n\n", result.summary()));

        if result.new_vulnerabilities.is_empty() {
            out.push_str("No new vulnerabilities introduced.\n");
        } else {
            out.push_str("### New vulnerabilities\n\n");
            out.push_str("| Severity | Category | File | Line | Description |\n");
            out.push_str("|---|---|---|---|---|\n");
            for vuln in &result.new_vulnerabilities {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    vuln.severity.as_str(),
                    vuln.category.as_str(),
                    vuln.file_path,
                    vuln.sink.line,
                    vuln.description,
                ));
            }
        }

        if !result.fixed_vulnerabilities.is_empty() {
            out.push_str(&format!(
                "\n{} vulnerabilities fixed in this change.\n",
                result.fixed_vulnerabilities.len()
            ));
        }

        if !result.removed_sanitizers.is_empty() {
            out.push_str(&format!(
                "\nWarning: {} sanitizer(s) removed.\n",
                result.removed_sanitizers.len()
            ));
        }

        out
    }
}
