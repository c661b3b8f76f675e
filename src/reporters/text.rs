//! Text (terminal) reporter

use crate::models::{Finding, Severity};
use crate::pipeline::AnalysisResult;
use anyhow::Result;
use console::style;

fn severity_tag(severity: Severity) -> String {
    match severity {
        Severity::Error => style("error").red().bold().to_string(),
        Severity::Warning => style("warning").yellow().bold().to_string(),
        Severity::Info => style("info").dim().to_string(),
    }
}

fn finding_line(finding: &Finding) -> String {
    let location = finding
        .file
        .as_deref()
        .map(|f| format!("{}: ", style(f).cyan()))
        .unwrap_or_default();
    format!(
        "  [{}] {} — {}{}",
        severity_tag(finding.severity),
        style(&finding.name).bold(),
        location,
        finding.message
    )
}

/// Render the scan summary for the terminal.
pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();
    let s = &result.summary;

    out.push_str(&format!("{}\n", style("swiftlens scan").bold().underlined()));
    out.push_str(&format!(
        "  {} files · {} types · {} functions · {} call sites\n\n",
        s.files, s.types, s.functions, s.call_sites
    ));

    if result.findings.is_empty() {
        out.push_str(&format!("{}\n", style("No signals found.").green()));
        return Ok(out);
    }

    out.push_str(&format!(
        "{}\n",
        style(format!("Signals ({})", s.signals.total)).bold()
    ));
    for finding in &result.findings {
        out.push_str(&finding_line(finding));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!(
        "  {} error(s), {} warning(s), {} info\n",
        style(s.signals.error).red(),
        style(s.signals.warning).yellow(),
        style(s.signals.info).dim()
    ));

    Ok(out)
}

/// Render validator findings; kept separate from the signal report.
pub fn render_validation(findings: &[Finding]) -> String {
    let mut out = String::new();
    if findings.is_empty() {
        out.push_str(&format!(
            "{}\n",
            style("Validation passed: IR is referentially consistent.").green()
        ));
        return out;
    }
    out.push_str(&format!(
        "{}\n",
        style(format!("Validation problems ({})", findings.len()))
            .red()
            .bold()
    ));
    for finding in findings {
        out.push_str(&finding_line(finding));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pipeline;

    #[test]
    fn test_render_lists_findings() {
        console::set_colors_enabled(false);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A.swift"), "import B\n").unwrap();
        std::fs::write(dir.path().join("B.swift"), "import A\n").unwrap();
        let result = pipeline::analyze(dir.path(), &Config::default(), || {}).unwrap();

        let text = render(&result).unwrap();
        assert!(text.contains("swiftlens scan"));
        assert!(text.contains("circular-dependency"));
        assert!(text.contains("error"));
    }

    #[test]
    fn test_render_validation_empty() {
        console::set_colors_enabled(false);
        let text = render_validation(&[]);
        assert!(text.contains("Validation passed"));
    }
}
